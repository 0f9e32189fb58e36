use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max].
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the half open interval [min, max).
    fn uniform_real(&self, min: f64, max: f64) -> f64;
}

/// A default random implementation seeded explicitly, so that identical seeds reproduce
/// identical value streams.
pub struct DefaultRandom {
    rng: RefCell<SmallRng>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { rng: RefCell::new(SmallRng::seed_from_u64(seed)) }
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.rng.borrow_mut().gen_range(min..=max)
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        assert!(min < max);
        self.rng.borrow_mut().gen_range(min..max)
    }
}
