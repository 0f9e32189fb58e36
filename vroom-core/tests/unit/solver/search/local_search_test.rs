use super::*;
use crate::helpers::*;
use crate::solver::Indicators;
use crate::utils::Environment;

#[test]
fn can_reach_a_fixpoint() {
    let input = create_test_input(
        vec![
            create_test_job(1, 1),
            create_test_job(2, 4),
            create_test_job(3, 2),
            create_test_job(4, 3),
        ],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0)), create_test_vehicle(2, Some(4), Some(4))],
        create_line_matrix(5),
    );
    // everything piled badly onto the first vehicle
    let mut ctx = create_context(&input, vec![vec![1, 0, 3, 2], vec![]]);
    let before = Indicators::of(&input, &ctx);

    improve(&input, &mut ctx, None, &Environment::default());

    let after = Indicators::of(&input, &ctx);
    assert!(after.better_than(&before));

    // fixpoint: no pair admits another improving move
    let fleet = ctx.solution.routes.len();
    for s in 0..fleet {
        for t in 0..fleet {
            assert!(scan_pair(&input, &ctx, s, t).is_none());
        }
    }
}

#[test]
fn exploration_budget_caps_applied_moves() {
    let input = create_test_input(
        vec![create_test_job(1, 1), create_test_job(2, 4)],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0)), create_test_vehicle(2, Some(4), Some(4))],
        create_line_matrix(5),
    );
    let mut ctx = create_context(&input, vec![vec![1, 0], vec![]]);
    let untouched = ctx.solution.clone();

    improve(&input, &mut ctx, Some(0), &Environment::default());

    assert_eq!(ctx.solution, untouched);
}

#[test]
fn stopped_environment_returns_immediately() {
    let input = create_test_input(
        vec![create_test_job(1, 1), create_test_job(2, 4)],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0)), create_test_vehicle(2, Some(4), Some(4))],
        create_line_matrix(5),
    );
    let mut ctx = create_context(&input, vec![vec![1, 0], vec![]]);
    let untouched = ctx.solution.clone();

    let environment = Environment::default();
    environment.request_stop();
    improve(&input, &mut ctx, None, &environment);

    assert_eq!(ctx.solution, untouched);
}
