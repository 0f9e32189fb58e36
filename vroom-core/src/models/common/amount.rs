#[cfg(test)]
#[path = "../../../tests/unit/models/common/amount_test.rs"]
mod amount_test;

use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

/// A multi dimensional load: a fixed length vector of signed integers with componentwise
/// arithmetic and comparison. All amounts within one problem share the same length.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Amount {
    values: Vec<i64>,
}

impl Amount {
    /// Creates a zero amount of the given size.
    pub fn new(size: usize) -> Self {
        Self { values: vec![0; size] }
    }

    /// Returns amount of dimensions.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Checks whether all components are less than or equal to the other amount's.
    pub fn le(&self, other: &Self) -> bool {
        debug_assert_eq!(self.size(), other.size());
        self.values.iter().zip(other.values.iter()).all(|(l, r)| l <= r)
    }

    /// Checks whether all components are non negative.
    pub fn is_not_negative(&self) -> bool {
        self.values.iter().all(|&v| v >= 0)
    }

    /// Returns the componentwise maximum of two amounts.
    pub fn max(&self, other: &Self) -> Self {
        debug_assert_eq!(self.size(), other.size());
        Self { values: self.values.iter().zip(other.values.iter()).map(|(l, r)| *l.max(r)).collect() }
    }

    /// Returns the componentwise minimum of two amounts.
    pub fn min(&self, other: &Self) -> Self {
        debug_assert_eq!(self.size(), other.size());
        Self { values: self.values.iter().zip(other.values.iter()).map(|(l, r)| *l.min(r)).collect() }
    }

    /// Returns components as a slice.
    pub fn as_slice(&self) -> &[i64] {
        self.values.as_slice()
    }
}

impl From<Vec<i64>> for Amount {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}

impl Index<usize> for Amount {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl Add<&Amount> for Amount {
    type Output = Amount;

    fn add(mut self, rhs: &Amount) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        debug_assert_eq!(self.size(), rhs.size());
        self.values.iter_mut().zip(rhs.values.iter()).for_each(|(l, r)| *l += r);
    }
}

impl Sub<&Amount> for Amount {
    type Output = Amount;

    fn sub(mut self, rhs: &Amount) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign<&Amount> for Amount {
    fn sub_assign(&mut self, rhs: &Amount) {
        debug_assert_eq!(self.size(), rhs.size());
        self.values.iter_mut().zip(rhs.values.iter()).for_each(|(l, r)| *l -= r);
    }
}
