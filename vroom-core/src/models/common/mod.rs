//! Common unit types shared by problem and solution models.

mod amount;
pub use self::amount::Amount;

mod domain;
pub use self::domain::Cost;
pub use self::domain::Distance;
pub use self::domain::Duration;
pub use self::domain::Eval;
pub use self::domain::Location;
pub use self::domain::Priority;
pub use self::domain::Skill;
pub use self::domain::TimeWindow;
pub use self::domain::MAX_TIME;
