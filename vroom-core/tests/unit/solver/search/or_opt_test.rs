use super::*;
use crate::helpers::*;

#[test]
fn can_move_segment_to_other_route() {
    let input = create_test_input(
        vec![create_test_job(1, 3), create_test_job(2, 4)],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0)), create_test_vehicle(2, Some(3), Some(4))],
        create_line_matrix(5),
    );
    let ctx = create_context(&input, vec![vec![0, 1], vec![]]);

    let mut best = None;
    scan(&input, &ctx, 0, 1, &mut best);

    let candidate = best.expect("improving or-opt");
    assert_eq!(
        candidate.move_,
        Move::OrOpt { s_route: 0, s_rank: 0, len: 2, t_route: 1, t_rank: 0, reversed: false }
    );
    assert_eq!(candidate.gain.cost, 80);
    assert_eq!(candidate.gain, candidate.move_.gain(&input, &ctx));
}

#[test]
fn can_move_segment_within_route() {
    let input = create_test_input(
        vec![create_test_job(1, 2), create_test_job(2, 3), create_test_job(3, 1)],
        vec![],
        vec![create_test_vehicle(1, Some(0), None)],
        create_line_matrix(5),
    );
    let ctx = create_context(&input, vec![vec![0, 1, 2]]);

    let mut best = None;
    scan_intra(&input, &ctx, 0, &mut best);

    let candidate = best.expect("improving intra or-opt");
    assert_eq!(candidate.gain, candidate.move_.gain(&input, &ctx));

    let mut applied = ctx.clone();
    candidate.move_.apply(&input, &mut applied);
    assert_eq!(applied.solution.routes[0].steps, vec![2, 0, 1]);
}

#[test]
fn shipment_segments_move_whole_and_unreversed() {
    let input = create_test_input(
        vec![],
        vec![create_shipment(1, 3, 2, 4, vec![2])],
        vec![create_test_vehicle(1, Some(0), Some(0)), create_test_vehicle(2, Some(3), Some(4))],
        create_line_matrix(5),
    );
    let ctx = create_context(&input, vec![vec![0, 1], vec![]]);

    let mut best = None;
    scan(&input, &ctx, 0, 1, &mut best);

    let candidate = best.expect("improving or-opt");
    match candidate.move_ {
        Move::OrOpt { reversed, .. } => assert!(!reversed),
        other => panic!("expected or-opt, got {other:?}"),
    }
}
