use super::*;
use crate::helpers::{SHIPMENT_PROBLEM, SIMPLE_PROBLEM};
use vroom_core::models::common::TimeWindow;

fn parse(document: &str) -> (Input, crate::CoordIndex) {
    let problem: Problem = serde_json::from_str(document).expect("valid json");
    parse_problem(problem).expect("valid problem")
}

#[test]
fn can_parse_simple_problem() {
    let (input, _) = parse(SIMPLE_PROBLEM);

    assert_eq!(input.amount_size, 1);
    assert_eq!(input.profiles, vec!["car".to_string()]);

    assert_eq!(input.jobs.len(), 2);
    assert_eq!(input.jobs[0].id, 1);
    assert_eq!(input.jobs[0].service, 5);
    assert_eq!(input.jobs[0].delivery.as_slice(), &[3]);
    // deprecated amount key maps to delivery
    assert_eq!(input.jobs[1].delivery.as_slice(), &[4]);
    assert_eq!(input.jobs[0].time_windows, vec![TimeWindow::max()]);

    assert_eq!(input.vehicles.len(), 1);
    assert_eq!(input.vehicles[0].id, 7);
    assert_eq!(input.vehicles[0].time_window, TimeWindow::new(0, 36000));
    assert_eq!(input.vehicles[0].costs.per_hour, 3600);

    assert_eq!(input.duration(0, 1, 2), 15);
}

#[test]
fn can_parse_deprecated_matrix_and_shipments() {
    let (input, _) = parse(SHIPMENT_PROBLEM);

    assert_eq!(input.jobs.len(), 2);
    let pickup = &input.jobs[0];
    let delivery = &input.jobs[1];
    assert_eq!(pickup.id, 10);
    assert_eq!(pickup.partner, Some(1));
    assert_eq!(delivery.partner, Some(0));
    assert_eq!(pickup.pickup.as_slice(), &[2]);
    assert_eq!(delivery.delivery.as_slice(), &[2]);
    assert_eq!(pickup.priority, 5);

    // the deprecated matrix key feeds the default profile
    assert_eq!(input.duration(0, 0, 1), 10);
}

#[test]
fn default_cost_parameters_apply() {
    let (input, _) = parse(SHIPMENT_PROBLEM);

    assert_eq!(input.vehicles[0].costs.per_hour, 3600);
    assert_eq!(input.vehicles[0].costs.per_km, 0);
    assert_eq!(input.vehicles[0].costs.fixed, 0);
    assert_eq!(input.vehicles[0].speed_factor, 1.);
}

#[test]
fn rejects_location_without_index_when_matrices_given() {
    let document = r#"
    {
        "vehicles": [{"id": 1, "start_index": 0, "capacity": [1]}],
        "jobs": [{"id": 1, "location": [2.35, 48.85]}],
        "matrix": [[0]]
    }
    "#;
    let problem: Problem = serde_json::from_str(document).expect("valid json");

    match parse_problem(problem) {
        Err(vroom_core::Error::Input(message)) => assert!(message.contains("missing location index")),
        other => panic!("expected input error, got {other:?}"),
    }
}

#[test]
fn rejects_non_square_matrix() {
    let document = r#"
    {
        "vehicles": [{"id": 1, "start_index": 0, "capacity": [1]}],
        "jobs": [{"id": 1, "location_index": 1}],
        "matrix": [[0, 1], [1, 0], [2, 2]]
    }
    "#;
    let problem: Problem = serde_json::from_str(document).expect("valid json");

    assert!(matches!(parse_problem(problem), Err(vroom_core::Error::Input(_))));
}

#[test]
fn can_parse_vehicle_steps() {
    let document = r#"
    {
        "vehicles": [
            {
                "id": 1,
                "start_index": 0,
                "capacity": [1],
                "steps": [
                    {"type": "start"},
                    {"type": "job", "id": 1, "service_after": 100},
                    {"type": "end"}
                ]
            }
        ],
        "jobs": [{"id": 1, "location_index": 1}],
        "matrix": [[0, 1], [1, 0]]
    }
    "#;
    let problem: Problem = serde_json::from_str(document).expect("valid json");
    let (input, _) = parse_problem(problem).expect("valid problem");

    assert_eq!(input.forced_jobs(0), vec![0]);
    assert_eq!(input.vehicles[0].steps.len(), 3);
}
