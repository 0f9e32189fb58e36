//! Problem definition models: jobs, vehicles, travel matrices.

use crate::models::common::{Duration, TimeWindow};

mod jobs;
pub use self::jobs::Job;
pub use self::jobs::JobKind;

mod fleet;
pub use self::fleet::Break;
pub use self::fleet::ForcedService;
pub use self::fleet::StepRef;
pub use self::fleet::Vehicle;
pub use self::fleet::VehicleCosts;
pub use self::fleet::VehicleStep;

mod matrices;
pub use self::matrices::Matrix;
pub use self::matrices::ProfileMatrices;
pub(crate) use self::matrices::round_half_away;

/// Finds the earliest service start not before `ready` inside one of the sorted half open
/// `windows`, or `None` when every window is already over.
pub(crate) fn earliest_start_after(windows: &[TimeWindow], ready: Duration) -> Option<Duration> {
    windows.iter().find(|tw| ready < tw.end).map(|tw| ready.max(tw.start))
}

/// Finds the latest service start not after `bound` inside one of the sorted half open
/// `windows`, or `None` when every window opens too late.
pub(crate) fn latest_start_before(windows: &[TimeWindow], bound: Duration) -> Option<Duration> {
    windows.iter().rev().find(|tw| tw.start <= bound).map(|tw| bound.min(tw.latest_start()))
}
