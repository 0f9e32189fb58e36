#[cfg(test)]
#[path = "../../../tests/unit/models/problem/matrices_test.rs"]
mod matrices_test;

use crate::models::common::{Cost, Distance, Duration};
use std::ops::{Index, IndexMut};

/// A square matrix over locations, stored row major.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Matrix<T> {
    size: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Creates a zero filled square matrix of the given size.
    pub fn new(size: usize) -> Self {
        Self { size, data: vec![T::default(); size * size] }
    }

    /// Creates a matrix from row major data, which must be square.
    pub fn from_data(size: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == size * size).then_some(Self { size, data })
    }

    /// Returns amount of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &Self::Output {
        &self.data[row * self.size..(row + 1) * self.size]
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.data[row * self.size..(row + 1) * self.size]
    }
}

/// Travel data of one routing profile. Durations are mandatory by solve time; absent distances
/// default to zero; absent costs are synthesized from the vehicle cost parameters.
#[derive(Clone, Debug, Default)]
pub struct ProfileMatrices {
    /// Travel durations.
    pub durations: Option<Matrix<Duration>>,
    /// Travel distances.
    pub distances: Option<Matrix<Distance>>,
    /// Custom travel costs.
    pub costs: Option<Matrix<Cost>>,
}

impl ProfileMatrices {
    /// Returns the size shared by the present matrices, when any is present.
    pub fn size(&self) -> Option<usize> {
        self.durations
            .as_ref()
            .map(Matrix::size)
            .or_else(|| self.distances.as_ref().map(Matrix::size))
            .or_else(|| self.costs.as_ref().map(Matrix::size))
    }
}

/// Rounds half away from zero, the single rounding convention used for every user visible
/// scaling in the solver.
pub(crate) fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}
