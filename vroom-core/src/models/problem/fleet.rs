#[cfg(test)]
#[path = "../../../tests/unit/models/problem/fleet_test.rs"]
mod fleet_test;

use crate::models::common::{Amount, Cost, Distance, Duration, Location, Skill, TimeWindow};
use hashbrown::HashSet;

/// Default hourly cost: one cost unit per second of travel.
pub(crate) const DEFAULT_COST_PER_HOUR: Cost = 3600;

/// Specifies user facing cost parameters of one vehicle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VehicleCosts {
    /// A cost of using the vehicle at all.
    pub fixed: Cost,
    /// A cost per travel hour.
    pub per_hour: Cost,
    /// A cost per travel kilometer.
    pub per_km: Cost,
}

impl Default for VehicleCosts {
    fn default() -> Self {
        Self { fixed: 0, per_hour: DEFAULT_COST_PER_HOUR, per_km: 0 }
    }
}

/// A vehicle bound rest event with its own time windows and service time.
#[derive(Clone, Debug)]
pub struct Break {
    /// A stable user facing id.
    pub id: u64,
    /// Sorted time windows, the break must begin inside one of them.
    pub time_windows: Vec<TimeWindow>,
    /// Break duration.
    pub service: Duration,
    /// An optional load ceiling while the break is taken.
    pub max_load: Option<Amount>,
    /// A user description, echoed into the solution.
    pub description: String,
}

impl Break {
    /// Returns the earliest feasible break start not before `ready`.
    pub fn earliest_start(&self, ready: Duration) -> Option<Duration> {
        super::earliest_start_after(&self.time_windows, ready)
    }

    /// Returns the latest feasible break start not after `bound`.
    pub fn latest_start(&self, bound: Duration) -> Option<Duration> {
        super::latest_start_before(&self.time_windows, bound)
    }
}

/// Identifies the target of a forced vehicle step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepRef {
    /// The route start.
    Start,
    /// The route end.
    End,
    /// A single job by id.
    Job(u64),
    /// A shipment pickup by id.
    Pickup(u64),
    /// A shipment delivery by id.
    Delivery(u64),
    /// A vehicle break by id.
    Break(u64),
}

/// Optional timing hints attached to a forced step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ForcedService {
    /// Service must start exactly at this time.
    pub at: Option<Duration>,
    /// Service must start at or after this time.
    pub after: Option<Duration>,
    /// Service must start before this time.
    pub before: Option<Duration>,
}

/// A forced step pinning part of the vehicle's route up front.
#[derive(Clone, Debug)]
pub struct VehicleStep {
    /// The pinned step.
    pub kind: StepRef,
    /// Timing hints for the step.
    pub forced: ForcedService,
}

/// Represents a vehicle together with its work shift constraints.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// A stable user facing id.
    pub id: u64,
    /// An optional start location.
    pub start: Option<Location>,
    /// An optional end location.
    pub end: Option<Location>,
    /// An interned routing profile index.
    pub profile: usize,
    /// Carrying capacity.
    pub capacity: Amount,
    /// Skills the vehicle provides.
    pub skills: HashSet<Skill>,
    /// The work shift time window.
    pub time_window: TimeWindow,
    /// Breaks ordered by their first time window.
    pub breaks: Vec<Break>,
    /// Cost parameters.
    pub costs: VehicleCosts,
    /// A duration scale: higher factor means faster travel.
    pub speed_factor: f64,
    /// An optional limit on the amount of served tasks.
    pub max_tasks: Option<usize>,
    /// An optional limit on accumulated travel time.
    pub max_travel_time: Option<Duration>,
    /// An optional limit on accumulated travel distance.
    pub max_distance: Option<Distance>,
    /// Forced steps pinning parts of the route.
    pub steps: Vec<VehicleStep>,
    /// A user description, echoed into the solution.
    pub description: String,
}

impl Vehicle {
    /// Checks whether the vehicle provides all skills required by the job.
    pub fn can_serve(&self, required: &HashSet<Skill>) -> bool {
        required.is_subset(&self.skills)
    }

    /// Returns the location used for the first travel leg, when any.
    pub fn first_location(&self) -> Option<Location> {
        self.start.or(self.end)
    }
}
