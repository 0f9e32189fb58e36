use super::*;
use crate::helpers::*;
use crate::models::common::TimeWindow;
use crate::models::problem::{VehicleCosts, VehicleStep};

fn build_input(configure: impl FnOnce(&mut InputBuilder)) -> Result<Input, Error> {
    let mut builder = InputBuilder::new(1);
    let profile = builder.profile("car");
    builder.durations(profile, Matrix::from_data(3, create_line_matrix(3).into_iter().flatten().collect()).unwrap());
    configure(&mut builder);

    builder.build()
}

#[test]
fn can_build_minimal_input() {
    let input = build_input(|builder| {
        builder.add_job(create_test_job(1, 1));
        builder.add_vehicle(create_test_vehicle(1, Some(0), Some(0)));
    })
    .expect("valid input");

    assert_eq!(input.jobs.len(), 1);
    assert_eq!(input.vehicles.len(), 1);
    assert_eq!(input.profiles, vec!["car".to_string()]);
}

parameterized_test! {can_reject_invalid_input, (configure, expected), {
    can_reject_invalid_input_impl(configure, expected);
}}

can_reject_invalid_input! {
    case_01_duplicate_id: (|builder: &mut InputBuilder| {
        builder.add_job(create_test_job(1, 1)).add_job(create_test_job(1, 2));
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    }, "duplicate id"),
    case_02_amount_length: (|builder: &mut InputBuilder| {
        builder.add_job(create_delivery_job(1, 1, vec![1, 2]));
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    }, "inconsistent amount length"),
    case_03_bad_time_window: (|builder: &mut InputBuilder| {
        builder.add_job(create_job_with_tws(1, 1, vec![(10, 10)]));
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    }, "invalid time window"),
    case_04_no_start_no_end: (|builder: &mut InputBuilder| {
        builder.add_vehicle(create_test_vehicle(1, None, None));
    }, "neither start nor end"),
    case_05_location_out_of_range: (|builder: &mut InputBuilder| {
        builder.add_job(create_test_job(1, 7));
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    }, "out of range"),
    case_06_bad_priority: (|builder: &mut InputBuilder| {
        let mut job = create_test_job(1, 1);
        job.priority = 101;
        builder.add_job(job);
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    }, "invalid priority"),
    case_07_bad_speed_factor: (|builder: &mut InputBuilder| {
        let mut vehicle = create_test_vehicle(1, Some(0), None);
        vehicle.speed_factor = 0.;
        builder.add_vehicle(vehicle);
    }, "invalid speed factor"),
    case_08_unknown_forced_step: (|builder: &mut InputBuilder| {
        let mut vehicle = create_test_vehicle(1, Some(0), None);
        vehicle.steps = vec![VehicleStep { kind: StepRef::Job(42), forced: Default::default() }];
        builder.add_vehicle(vehicle);
    }, "unknown id in steps"),
    case_09_shipment_amount_mismatch: (|builder: &mut InputBuilder| {
        let (pickup, mut delivery) = create_shipment(1, 1, 2, 2, vec![3]);
        delivery.delivery = crate::models::common::Amount::from(vec![4]);
        builder.add_shipment(pickup, delivery);
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    }, "mismatched shipment amount"),
}

fn can_reject_invalid_input_impl(configure: impl FnOnce(&mut InputBuilder), expected: &str) {
    let result = build_input(configure);

    match result {
        Err(Error::Input(message)) => assert!(message.contains(expected), "unexpected message: {message}"),
        other => panic!("expected input error, got: {other:?}"),
    }
}

#[test]
fn can_report_missing_durations_as_routing_error() {
    let mut builder = InputBuilder::new(1);
    let profile = builder.profile("truck");
    let _ = profile;
    builder.add_job(create_test_job(1, 0));
    builder.add_vehicle(create_test_vehicle(1, Some(0), None));

    match builder.build() {
        Err(Error::Routing(message)) => assert!(message.contains("no durations matrix")),
        other => panic!("expected routing error, got: {other:?}"),
    }
}

#[test]
fn can_scale_durations_by_speed_factor() {
    let input = build_input(|builder| {
        builder.add_job(create_test_job(1, 2));
        let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
        vehicle.speed_factor = 2.;
        builder.add_vehicle(vehicle);
        let mut slow = create_test_vehicle(2, Some(0), Some(0));
        slow.speed_factor = 0.5;
        builder.add_vehicle(slow);
    })
    .expect("valid input");

    assert_eq!(input.duration(0, 0, 2), 10);
    assert_eq!(input.duration(1, 0, 2), 40);
}

#[test]
fn can_synthesize_edge_costs() {
    let input = build_input(|builder| {
        builder.add_job(create_test_job(1, 1));
        let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
        vehicle.costs = VehicleCosts { fixed: 100, per_hour: 7200, per_km: 0 };
        builder.add_vehicle(vehicle);
    })
    .expect("valid input");

    // one second of travel costs two cost units at 7200 per hour
    assert_eq!(input.cost(0, 0, 1), 20);
    assert_eq!(input.user_route_cost(0, 10, 0), 120);
}

#[test]
fn can_resolve_forced_jobs() {
    let input = build_input(|builder| {
        builder.add_job(create_test_job(7, 1)).add_job(create_test_job(8, 2));
        let mut vehicle = create_test_vehicle(1, Some(0), None);
        vehicle.steps = vec![
            VehicleStep { kind: StepRef::Start, forced: Default::default() },
            VehicleStep { kind: StepRef::Job(8), forced: Default::default() },
            VehicleStep { kind: StepRef::Job(7), forced: Default::default() },
            VehicleStep { kind: StepRef::End, forced: Default::default() },
        ];
        builder.add_vehicle(vehicle);
    })
    .expect("valid input");

    assert_eq!(input.forced_jobs(0), vec![1, 0]);
}

#[test]
fn universal_time_window_is_accepted() {
    let result = build_input(|builder| {
        builder.add_job(create_job_with_tws(1, 1, vec![(0, TimeWindow::max().end)]));
        builder.add_vehicle(create_test_vehicle(1, Some(0), None));
    });

    assert!(result.is_ok());
}
