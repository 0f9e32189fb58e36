#[cfg(test)]
#[path = "../../tests/unit/construction/state_test.rs"]
mod state_test;

use crate::models::common::{Amount, Cost, Duration, Eval};
use crate::models::solution::{simulate, Route, RouteSchedule, Solution};
use crate::models::Input;
use std::collections::BTreeSet;

/// Precomputed per route summaries which make move evaluation O(1): load peaks in both
/// directions, earliest and latest feasible service starts, and cumulative travel evaluations
/// in both traversal orientations. Rebuilt in O(|route|) after every applied move.
#[derive(Clone, Debug, Default)]
pub struct RouteState {
    /// Load right after serving each rank.
    pub load_after: Vec<Amount>,
    /// Componentwise max of the start load and every load up to the rank, inclusive.
    pub fwd_peak: Vec<Amount>,
    /// Componentwise max of every load from the rank on, inclusive.
    pub bwd_peak: Vec<Amount>,
    /// Earliest feasible service start per rank.
    pub earliest: Vec<Duration>,
    /// Latest feasible service start per rank.
    pub latest: Vec<Duration>,
    /// Cumulative travel evaluation from the route start up to the arrival at each rank.
    pub fwd: Vec<Eval>,
    /// Cumulative travel evaluation of the reversed orientation: from the last rank back to
    /// each rank, so that reversed segment evaluations stay O(1).
    pub bwd: Vec<Eval>,
    /// Amount of shipments open across each rank boundary: `open_pairs[k]` counts pickups
    /// before rank `k` whose delivery sits at rank `k` or later. A boundary with zero open
    /// shipments can be cut without splitting a pair.
    pub open_pairs: Vec<u32>,
    /// Load when leaving the route start.
    pub start_load: Amount,
    /// Travel evaluation of the whole route, final leg included.
    pub eval_total: Eval,
    /// Whether the shift, a break or any served job constrains the schedule at all. When unset,
    /// any step permutation is schedulable and time checks are skipped.
    pub time_constrained: bool,
    /// The exact earliest schedule, breaks included.
    pub schedule: RouteSchedule,
}

impl RouteState {
    /// Computes the state of a route which is known to be schedulable. Panics otherwise: moves
    /// are validated before application, so an unschedulable route is an invariant violation.
    pub fn new(input: &Input, route: &Route) -> Self {
        let schedule = simulate(input, route.vehicle, &route.steps)
            .unwrap_or_else(|| panic!("lost schedule for vehicle {}", input.vehicles[route.vehicle].id));

        let n = route.steps.len();
        let vehicle = &input.vehicles[route.vehicle];
        let start_load = crate::models::solution::schedule_start_load(input, &route.steps);

        let mut load_after = Vec::with_capacity(n);
        let mut load = start_load.clone();
        for &step in route.steps.iter() {
            let job = &input.jobs[step];
            load += &job.pickup;
            load -= &job.delivery;
            load_after.push(load.clone());
        }

        let mut fwd_peak = Vec::with_capacity(n);
        let mut peak = start_load.clone();
        for load in load_after.iter() {
            peak = peak.max(load);
            fwd_peak.push(peak.clone());
        }

        let mut bwd_peak = vec![Amount::default(); n];
        for rank in (0..n).rev() {
            bwd_peak[rank] = if rank + 1 < n {
                load_after[rank].max(&bwd_peak[rank + 1])
            } else {
                load_after[rank].clone()
            };
        }

        let mut fwd = Vec::with_capacity(n);
        let mut acc = Eval::default();
        let mut prev = vehicle.start;
        for &step in route.steps.iter() {
            let location = input.jobs[step].location;
            acc += input.leg(route.vehicle, prev, Some(location));
            fwd.push(acc);
            prev = Some(location);
        }

        let mut bwd = vec![Eval::default(); n];
        for rank in (0..n.saturating_sub(1)).rev() {
            let from = input.jobs[route.steps[rank + 1]].location;
            let to = input.jobs[route.steps[rank]].location;
            bwd[rank] = bwd[rank + 1] + input.eval(route.vehicle, from, to);
        }

        let eval_total = if n == 0 {
            Eval::default()
        } else {
            fwd[n - 1] + input.leg(route.vehicle, prev, vehicle.end)
        };

        let mut open_pairs = Vec::with_capacity(n + 1);
        let mut open = 0_u32;
        open_pairs.push(open);
        for &step in route.steps.iter() {
            match input.jobs[step].kind {
                crate::models::problem::JobKind::Pickup => open += 1,
                crate::models::problem::JobKind::Delivery => open -= 1,
                crate::models::problem::JobKind::Single => {}
            }
            open_pairs.push(open);
        }

        let latest = compute_latest(input, route, &schedule);

        let time_constrained = vehicle.time_window != crate::models::common::TimeWindow::max()
            || !vehicle.breaks.is_empty()
            || route.steps.iter().any(|&step| input.jobs[step].is_time_constrained());

        Self {
            load_after,
            fwd_peak,
            bwd_peak,
            earliest: schedule.service_start.clone(),
            latest,
            fwd,
            bwd,
            open_pairs,
            start_load,
            eval_total,
            time_constrained,
            schedule,
        }
    }

    /// Returns the travel evaluation of the internal path from rank `from` to rank `to` in
    /// forward orientation.
    pub fn segment(&self, from: usize, to: usize) -> Eval {
        self.fwd[to] - self.fwd[from]
    }

    /// Returns the travel evaluation of visiting ranks `from..=to` in reverse order.
    pub fn segment_reversed(&self, from: usize, to: usize) -> Eval {
        self.bwd[from] - self.bwd[to]
    }

    /// Returns the internal route cost: the vehicle fixed cost, charged as soon as the route is
    /// used, plus the evaluated travel cost.
    pub fn internal_cost(&self, input: &Input, route: &Route) -> Cost {
        if route.is_empty() {
            0
        } else {
            input.vehicles[route.vehicle].costs.fixed + self.eval_total.cost
        }
    }
}

/// A solution together with the per route states and the set of jobs pinned by forced vehicle
/// steps. The states are kept consistent with the routes at all times.
#[derive(Clone, Debug, Default)]
pub struct SolutionContext {
    /// The solution being built or improved.
    pub solution: Solution,
    /// Route states, parallel to the solution routes.
    pub states: Vec<RouteState>,
    /// Jobs which must stay on their vehicle.
    pub locked: BTreeSet<usize>,
}

impl SolutionContext {
    /// Creates a context with every job unassigned.
    pub fn new(input: &Input) -> Self {
        let solution = Solution::empty(input);
        let states = solution.routes.iter().map(|route| RouteState::new(input, route)).collect();

        Self { solution, states, locked: BTreeSet::new() }
    }

    /// Rebuilds the state of one route after a mutation.
    pub fn rebuild(&mut self, input: &Input, vehicle: usize) {
        self.states[vehicle] = RouteState::new(input, &self.solution.routes[vehicle]);
    }

    /// Inserts an unassigned job at the given rank and rebuilds the route state.
    pub fn insert(&mut self, input: &Input, vehicle: usize, rank: usize, job: usize) {
        debug_assert!(self.solution.unassigned.contains(&job));
        self.solution.routes[vehicle].steps.insert(rank, job);
        self.solution.unassigned.remove(&job);
        self.rebuild(input, vehicle);
    }

    /// Inserts an unassigned pickup and delivery pair at the given ranks, the delivery rank
    /// counted after the pickup insertion, and rebuilds the route state.
    pub fn insert_pair(&mut self, input: &Input, vehicle: usize, pickup_rank: usize, delivery_rank: usize, pickup: usize) {
        let delivery = input.jobs[pickup].partner.expect("paired at build");
        debug_assert!(pickup_rank < delivery_rank);

        self.solution.routes[vehicle].steps.insert(pickup_rank, pickup);
        self.solution.routes[vehicle].steps.insert(delivery_rank, delivery);
        self.solution.unassigned.remove(&pickup);
        self.solution.unassigned.remove(&delivery);
        self.rebuild(input, vehicle);
    }

    /// Removes an assigned job, its shipment partner included, and rebuilds the route state.
    /// Returns the removed job indices.
    pub fn remove(&mut self, input: &Input, vehicle: usize, job: usize) -> Vec<usize> {
        let route = &mut self.solution.routes[vehicle];
        let mut removed = vec![job];
        if let Some(partner) = input.jobs[job].partner {
            removed.push(partner);
        }

        route.steps.retain(|step| !removed.contains(step));
        self.solution.unassigned.extend(removed.iter().copied());
        self.rebuild(input, vehicle);

        removed
    }
}

/// Checks the capacity invariant of a step sequence by walking its load profile.
pub(crate) fn capacity_ok(input: &Input, vehicle: usize, steps: &[usize]) -> bool {
    let capacity = &input.vehicles[vehicle].capacity;
    let mut load = crate::models::solution::schedule_start_load(input, steps);
    if !load.le(capacity) {
        return false;
    }

    steps.iter().all(|&step| {
        let job = &input.jobs[step];
        load += &job.pickup;
        load -= &job.delivery;
        load.le(capacity)
    })
}

/// Propagates latest feasible service starts backwards along the fixed break placement of the
/// forward schedule.
fn compute_latest(input: &Input, route: &Route, schedule: &RouteSchedule) -> Vec<Duration> {
    let vehicle = &input.vehicles[route.vehicle];
    let n = route.steps.len();
    let mut latest = vec![0; n];
    if n == 0 {
        return latest;
    }

    let last_location = input.jobs[route.steps[n - 1]].location;
    let final_leg = input.leg(route.vehicle, Some(last_location), vehicle.end);

    // latest completion of the last service: shift end minus the final travel and the breaks
    // taken before it
    let mut bound = unwind_breaks(vehicle, schedule, n, vehicle.time_window.end - final_leg.duration);

    for rank in (0..n).rev() {
        let job = &input.jobs[route.steps[rank]];
        let start = job
            .latest_start(bound - job.service)
            .unwrap_or_else(|| panic!("lost latest bound for job {}", job.id));
        latest[rank] = start;

        if rank > 0 {
            let prev = input.jobs[route.steps[rank - 1]].location;
            let travel = input.duration(route.vehicle, prev, job.location);
            bound = unwind_breaks(vehicle, schedule, rank, start - schedule.setup[rank] - travel);
        }
    }

    latest
}

/// Moves a completion bound backwards over the breaks taken in the given leg.
fn unwind_breaks(
    vehicle: &crate::models::problem::Vehicle,
    schedule: &RouteSchedule,
    leg: usize,
    mut bound: Duration,
) -> Duration {
    for (index, _) in schedule.break_leg.iter().enumerate().rev().filter(|(_, &at)| at == leg) {
        let brk = &vehicle.breaks[index];
        bound = brk
            .latest_start(bound - brk.service)
            .unwrap_or_else(|| panic!("lost latest bound for break {}", brk.id));
    }

    bound
}
