#[cfg(test)]
#[path = "../../../tests/unit/models/problem/jobs_test.rs"]
mod jobs_test;

use crate::models::common::{Amount, Duration, Location, Priority, Skill, TimeWindow};
use hashbrown::HashSet;

/// Distinguishes single jobs from the two halves of a pickup and delivery shipment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobKind {
    /// An independent job.
    Single,
    /// The pickup half of a shipment.
    Pickup,
    /// The delivery half of a shipment.
    Delivery,
}

/// Represents a task to be performed at one location.
#[derive(Clone, Debug)]
pub struct Job {
    /// A stable user facing id.
    pub id: u64,
    /// A job kind.
    pub kind: JobKind,
    /// Location where the job is performed.
    pub location: Location,
    /// Time spent on arrival before service, skipped when the previous step shares the location.
    pub setup: Duration,
    /// Service duration.
    pub service: Duration,
    /// Amount dropped off at the location.
    pub delivery: Amount,
    /// Amount picked up at the location.
    pub pickup: Amount,
    /// Skills required from a serving vehicle.
    pub skills: HashSet<Skill>,
    /// An assignment priority, higher is more important.
    pub priority: Priority,
    /// Sorted disjoint time windows, service must begin inside one of them.
    pub time_windows: Vec<TimeWindow>,
    /// A user description, echoed into the solution.
    pub description: String,
    /// Index of the paired shipment half, set for pickups and deliveries only.
    pub partner: Option<usize>,
}

impl Job {
    /// Returns the net load change caused by serving the job.
    pub fn load_change(&self) -> Amount {
        self.pickup.clone() - &self.delivery
    }

    /// Returns the earliest feasible service start not before `ready`, or `None` when every
    /// time window is already over.
    pub fn earliest_start(&self, ready: Duration) -> Option<Duration> {
        super::earliest_start_after(&self.time_windows, ready)
    }

    /// Returns the latest feasible service start not after `bound`, or `None` when every
    /// time window opens too late.
    pub fn latest_start(&self, bound: Duration) -> Option<Duration> {
        super::latest_start_before(&self.time_windows, bound)
    }

    /// Checks whether the job carries a real time window constraint.
    pub fn is_time_constrained(&self) -> bool {
        self.time_windows.len() != 1 || self.time_windows[0] != TimeWindow::max()
    }
}
