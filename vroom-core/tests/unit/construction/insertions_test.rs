use super::*;
use crate::helpers::*;
use crate::models::problem::{StepRef, VehicleStep};

#[test]
fn can_assign_everything_that_fits() {
    let input = create_test_input(
        vec![create_delivery_job(1, 1, vec![3]), create_delivery_job(2, 2, vec![4])],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );
    let base = create_base_context(&input).expect("no forced steps");

    for variant in [HeuristicVariant::Sequential, HeuristicVariant::Parallel] {
        let ctx = build_initial_solution(&input, &base, variant, 0., 2);

        assert!(ctx.solution.unassigned.is_empty(), "unassigned left by {variant:?}");
        assert_eq!(ctx.solution.routes[0].steps.len(), 2);
    }
}

#[test]
fn can_prefer_higher_priority_under_scarcity() {
    let mut cheap = create_delivery_job(1, 1, vec![6]);
    cheap.priority = 0;
    let mut urgent = create_delivery_job(2, 2, vec![6]);
    urgent.priority = 10;
    let input = create_test_input(
        vec![cheap, urgent],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );
    let base = create_base_context(&input).expect("no forced steps");

    for variant in [HeuristicVariant::Sequential, HeuristicVariant::Parallel] {
        let ctx = build_initial_solution(&input, &base, variant, 0., 2);

        assert_eq!(ctx.solution.routes[0].steps, vec![1], "wrong pick by {variant:?}");
        assert!(ctx.solution.unassigned.contains(&0));
    }
}

#[test]
fn can_spread_shipments_with_precedence() {
    let input = create_test_input(
        vec![],
        vec![create_shipment(1, 1, 2, 2, vec![2])],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );
    let base = create_base_context(&input).expect("no forced steps");

    let ctx = build_initial_solution(&input, &base, HeuristicVariant::Parallel, 0., 2);

    assert_eq!(ctx.solution.routes[0].steps, vec![0, 1]);
    assert!(ctx.solution.unassigned.is_empty());
}

#[test]
fn can_pin_and_lock_forced_jobs() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.steps = vec![
        VehicleStep { kind: StepRef::Job(2), forced: Default::default() },
        VehicleStep { kind: StepRef::Job(1), forced: Default::default() },
    ];
    let input = create_test_input(
        vec![create_test_job(1, 1), create_test_job(2, 2)],
        vec![],
        vec![vehicle],
        create_line_matrix(3),
    );

    let base = create_base_context(&input).expect("feasible forced steps");

    assert_eq!(base.solution.routes[0].steps, vec![1, 0]);
    assert_eq!(base.locked.len(), 2);
    assert!(base.solution.unassigned.is_empty());
}

#[test]
fn can_reject_overloaded_forced_steps() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.steps = vec![VehicleStep { kind: StepRef::Job(1), forced: Default::default() }];
    let input = create_test_input(
        vec![create_delivery_job(1, 1, vec![99])],
        vec![],
        vec![vehicle],
        create_line_matrix(3),
    );

    match create_base_context(&input) {
        Err(crate::Error::Input(message)) => assert!(message.contains("overloaded steps")),
        other => panic!("expected input error, got {other:?}"),
    }
}

#[test]
fn recreate_fills_after_removal() {
    let input = create_test_input(
        vec![create_test_job(1, 1), create_test_job(2, 2)],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );
    let mut ctx = SolutionContext::new(&input);

    recreate(&input, &mut ctx, 0., 2);

    assert!(ctx.solution.unassigned.is_empty());
    assert_eq!(ctx.solution.routes[0].steps.len(), 2);
}
