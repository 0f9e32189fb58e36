use super::*;
use crate::helpers::*;

#[test]
fn can_shift_shipment_to_closer_vehicle() {
    let input = create_test_input(
        vec![],
        vec![create_shipment(1, 3, 2, 4, vec![2])],
        vec![create_test_vehicle(1, Some(0), None), create_test_vehicle(2, Some(3), None)],
        create_line_matrix(5),
    );
    let ctx = create_context(&input, vec![vec![0, 1], vec![]]);

    let mut best = None;
    scan(&input, &ctx, 0, 1, &mut best);

    let candidate = best.expect("improving pd shift");
    assert_eq!(
        candidate.move_,
        Move::PdShift { s_route: 0, pickup_rank: 0, delivery_rank: 1, t_route: 1, t_pickup: 0, t_delivery: 1 }
    );
    assert_eq!(candidate.gain.cost, 30);
    assert_eq!(candidate.gain, candidate.move_.gain(&input, &ctx));

    let mut applied = ctx.clone();
    candidate.move_.apply(&input, &mut applied);
    assert!(applied.solution.routes[0].is_empty());
    assert_eq!(applied.solution.routes[1].steps, vec![0, 1]);
}

#[test]
fn shipment_does_not_fit_over_capacity() {
    let mut small = create_test_vehicle(2, Some(3), None);
    small.capacity = crate::models::common::Amount::from(vec![1]);
    let input = create_test_input(
        vec![],
        vec![create_shipment(1, 3, 2, 4, vec![2])],
        vec![create_test_vehicle(1, Some(0), None), small],
        create_line_matrix(5),
    );
    let ctx = create_context(&input, vec![vec![0, 1], vec![]]);

    let mut best = None;
    scan(&input, &ctx, 0, 1, &mut best);

    assert!(best.is_none());
}
