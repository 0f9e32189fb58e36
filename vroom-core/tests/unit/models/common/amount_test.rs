use super::*;

parameterized_test! {can_compare_componentwise, (left, right, expected), {
    can_compare_componentwise_impl(Amount::from(left), Amount::from(right), expected);
}}

can_compare_componentwise! {
    case_01: (vec![1, 2], vec![2, 3], true),
    case_02: (vec![1, 2], vec![1, 2], true),
    case_03: (vec![1, 4], vec![2, 3], false),
    case_04: (vec![3, 2], vec![2, 3], false),
}

fn can_compare_componentwise_impl(left: Amount, right: Amount, expected: bool) {
    assert_eq!(left.le(&right), expected);
}

#[test]
fn can_do_arithmetic() {
    let left = Amount::from(vec![3, 5]);
    let right = Amount::from(vec![1, 7]);

    assert_eq!(left.clone() + &right, Amount::from(vec![4, 12]));
    assert_eq!(left.clone() - &right, Amount::from(vec![2, -2]));
    assert_eq!(left.max(&right), Amount::from(vec![3, 7]));
    assert_eq!(left.min(&right), Amount::from(vec![1, 5]));
}

#[test]
fn can_check_negative_components() {
    assert!(Amount::from(vec![0, 1]).is_not_negative());
    assert!(!Amount::from(vec![0, -1]).is_not_negative());
}
