use super::*;
use crate::helpers::*;
use crate::solver::search::assert_consistent;
use crate::utils::DefaultRandom;

fn perturb_fixture() -> (crate::models::Input, crate::construction::SolutionContext) {
    let input = create_test_input(
        vec![
            create_test_job(1, 1),
            create_test_job(2, 2),
            create_test_job(3, 3),
            create_test_job(4, 4),
        ],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(5),
    );
    let ctx = create_context(&input, vec![vec![0, 1, 2, 3]]);

    (input, ctx)
}

#[test]
fn perturbation_keeps_the_partition() {
    let (input, mut ctx) = perturb_fixture();

    perturb(&input, &mut ctx, &DefaultRandom::new(42), 0., 2);

    let assigned = ctx.solution.assigned();
    assert_eq!(assigned + ctx.solution.unassigned.len(), input.jobs.len());
    assert_consistent(&input, &ctx);
}

#[test]
fn identical_seeds_perturb_identically() {
    let (input, mut first) = perturb_fixture();
    let (_, mut second) = perturb_fixture();

    perturb(&input, &mut first, &DefaultRandom::new(7), 0.5, 2);
    perturb(&input, &mut second, &DefaultRandom::new(7), 0.5, 2);

    assert_eq!(first.solution, second.solution);
}

#[test]
fn locked_jobs_survive_the_ruin() {
    let (input, mut ctx) = perturb_fixture();
    ctx.locked.insert(0);

    perturb(&input, &mut ctx, &DefaultRandom::new(42), 0., 2);

    assert!(ctx.solution.routes[0].steps.contains(&0));
}
