#[cfg(test)]
#[path = "../../../tests/unit/models/solution/route_test.rs"]
mod route_test;

use crate::models::Input;
use std::collections::BTreeSet;

/// An ordered sequence of job indices served by one vehicle. Break placement is not part of the
/// sequence: breaks are scheduled around the jobs by the schedule simulation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Route {
    /// The serving vehicle index.
    pub vehicle: usize,
    /// Served job indices in visit order.
    pub steps: Vec<usize>,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle: usize) -> Self {
        Self { vehicle, steps: vec![] }
    }

    /// Checks whether the route serves any job.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the rank of the given job inside the route.
    pub fn rank_of(&self, job: usize) -> Option<usize> {
        self.steps.iter().position(|&step| step == job)
    }
}

/// A set of routes, one slot per vehicle, plus the unassigned jobs. The partition invariant
/// holds at all times: every job is either in exactly one route or unassigned.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Solution {
    /// Routes indexed by vehicle.
    pub routes: Vec<Route>,
    /// Unassigned job indices, ordered for reproducible iteration.
    pub unassigned: BTreeSet<usize>,
}

impl Solution {
    /// Creates a solution with all jobs unassigned.
    pub fn empty(input: &Input) -> Self {
        Self {
            routes: (0..input.vehicles.len()).map(Route::new).collect(),
            unassigned: (0..input.jobs.len()).collect(),
        }
    }

    /// Returns amount of assigned jobs.
    pub fn assigned(&self) -> usize {
        self.routes.iter().map(|route| route.steps.len()).sum()
    }
}
