//! Utility helpers shared across solver modules.

mod environment;
pub use self::environment::get_cpus;
pub use self::environment::Environment;
pub use self::environment::InfoLogger;

mod parallel;
pub use self::parallel::parallel_into_collect;

mod random;
pub use self::random::DefaultRandom;
pub use self::random::Random;
