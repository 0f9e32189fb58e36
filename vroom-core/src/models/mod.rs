//! Problem and solution domain models.

pub mod common;
pub mod problem;
pub mod solution;

mod input;
pub use self::input::Input;
pub use self::input::InputBuilder;
