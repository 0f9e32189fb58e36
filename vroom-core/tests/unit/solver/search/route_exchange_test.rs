use super::*;
use crate::helpers::*;

#[test]
fn can_swap_whole_routes() {
    let input = create_test_input(
        vec![create_test_job(1, 4), create_test_job(2, 1)],
        vec![],
        vec![create_test_vehicle(1, Some(0), None), create_test_vehicle(2, Some(5), None)],
        create_line_matrix(6),
    );
    let ctx = create_context(&input, vec![vec![0], vec![1]]);

    let mut best = None;
    scan(&input, &ctx, 0, 1, &mut best);

    let candidate = best.expect("improving route exchange");
    assert_eq!(candidate.move_, Move::RouteExchange { s_route: 0, t_route: 1 });
    assert_eq!(candidate.gain.cost, 60);
    assert_eq!(candidate.gain, candidate.move_.gain(&input, &ctx));

    let mut applied = ctx.clone();
    candidate.move_.apply(&input, &mut applied);
    assert_eq!(applied.solution.routes[0].steps, vec![1]);
    assert_eq!(applied.solution.routes[1].steps, vec![0]);
}

#[test]
fn pinned_routes_stay_with_their_vehicle() {
    let input = create_test_input(
        vec![create_test_job(1, 4), create_test_job(2, 1)],
        vec![],
        vec![create_test_vehicle(1, Some(0), None), create_test_vehicle(2, Some(5), None)],
        create_line_matrix(6),
    );
    let mut ctx = create_context(&input, vec![vec![0], vec![1]]);
    ctx.locked.insert(0);

    let mut best = None;
    scan(&input, &ctx, 0, 1, &mut best);

    assert!(best.is_none());
}
