#[cfg(test)]
#[path = "../../../tests/unit/models/common/domain_test.rs"]
mod domain_test;

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a time duration in seconds.
pub type Duration = i64;

/// Represents a travel distance in meters.
pub type Distance = i64;

/// Specifies cost value.
pub type Cost = i64;

/// Specifies a job priority in `0..=100`, higher is more important.
pub type Priority = u32;

/// Specifies location type: an index into the travel matrices.
pub type Location = usize;

/// Specifies a skill tag.
pub type Skill = u32;

/// An upper bound for timestamps, far enough to never be reached by a valid schedule while
/// leaving headroom for additions.
pub const MAX_TIME: Duration = i64::MAX / 4;

/// Represents a time window as a half open interval `[start, end)` of seconds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeWindow {
    /// Start of time window.
    pub start: Duration,
    /// End of time window, excluded.
    pub end: Duration,
}

impl TimeWindow {
    /// Creates a new [`TimeWindow`].
    pub fn new(start: Duration, end: Duration) -> Self {
        Self { start, end }
    }

    /// Returns the unconstrained time window.
    pub fn max() -> Self {
        Self { start: 0, end: MAX_TIME }
    }

    /// Checks whether time window contains given time.
    pub fn contains(&self, time: Duration) -> bool {
        self.start <= time && time < self.end
    }

    /// Checks whether time window has intersection with another one.
    pub fn intersects(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the latest time at which a service can still begin inside the window.
    pub fn latest_start(&self) -> Duration {
        self.end - 1
    }

    /// Returns duration of time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A cost triple aggregating the internal cost together with travel duration and distance.
/// Deltas are signed, so the same type carries totals and gains.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Eval {
    /// An internal cost.
    pub cost: Cost,
    /// A travel duration.
    pub duration: Duration,
    /// A travel distance.
    pub distance: Distance,
}

impl Eval {
    /// Creates a new instance of `Eval`.
    pub fn new(cost: Cost, duration: Duration, distance: Distance) -> Self {
        Self { cost, duration, distance }
    }
}

impl Add for Eval {
    type Output = Eval;

    fn add(self, rhs: Eval) -> Self::Output {
        Eval::new(self.cost + rhs.cost, self.duration + rhs.duration, self.distance + rhs.distance)
    }
}

impl AddAssign for Eval {
    fn add_assign(&mut self, rhs: Eval) {
        *self = *self + rhs;
    }
}

impl Sub for Eval {
    type Output = Eval;

    fn sub(self, rhs: Eval) -> Self::Output {
        Eval::new(self.cost - rhs.cost, self.duration - rhs.duration, self.distance - rhs.distance)
    }
}

impl SubAssign for Eval {
    fn sub_assign(&mut self, rhs: Eval) {
        *self = *self - rhs;
    }
}

impl Neg for Eval {
    type Output = Eval;

    fn neg(self) -> Self::Output {
        Eval::new(-self.cost, -self.duration, -self.distance)
    }
}

impl std::iter::Sum for Eval {
    fn sum<I: Iterator<Item = Eval>>(iter: I) -> Self {
        iter.fold(Eval::default(), |acc, item| acc + item)
    }
}
