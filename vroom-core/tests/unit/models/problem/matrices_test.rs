use super::*;

#[test]
fn can_index_rows() {
    let matrix = Matrix::from_data(2, vec![0, 1, 2, 3]).unwrap();

    assert_eq!(matrix[0][1], 1);
    assert_eq!(matrix[1][0], 2);
    assert_eq!(matrix.size(), 2);
}

#[test]
fn cannot_build_non_square_matrix() {
    assert!(Matrix::from_data(2, vec![0, 1, 2]).is_none());
}

#[test]
fn can_report_profile_size() {
    let mut matrices = ProfileMatrices::default();
    assert_eq!(matrices.size(), None);

    matrices.distances = Some(Matrix::<i64>::new(3));
    assert_eq!(matrices.size(), Some(3));
}

parameterized_test! {can_round_half_away_from_zero, (value, expected), {
    assert_eq!(round_half_away(value), expected);
}}

can_round_half_away_from_zero! {
    case_01: (1.4, 1),
    case_02: (1.5, 2),
    case_03: (-1.5, -2),
    case_04: (2.5, 3),
}
