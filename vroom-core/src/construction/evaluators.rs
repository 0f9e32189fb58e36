#[cfg(test)]
#[path = "../../tests/unit/construction/evaluators_test.rs"]
mod evaluators_test;

use crate::construction::RouteState;
use crate::models::common::{Eval, Location};
use crate::models::problem::JobKind;
use crate::models::solution::{simulate, Route};
use crate::models::Input;

/// Where an insertion goes. Pair ranks are expressed against the final sequence: the delivery
/// rank counts positions after the pickup has been inserted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertionPosition {
    /// A single job insertion.
    Single {
        /// Insertion rank.
        rank: usize,
    },
    /// A pickup and delivery pair insertion.
    Pair {
        /// Pickup insertion rank.
        pickup_rank: usize,
        /// Delivery insertion rank, after the pickup insertion.
        delivery_rank: usize,
    },
}

/// A feasible insertion together with its travel evaluation delta.
#[derive(Clone, Copy, Debug)]
pub struct Insertion {
    /// Where to insert.
    pub position: InsertionPosition,
    /// The travel evaluation delta caused by the insertion.
    pub delta: Eval,
}

/// Evaluates the cheapest feasible insertion of a job into a route. Pickups stand for their
/// whole shipment; deliveries are never evaluated on their own.
pub fn evaluate_job_insertion(
    input: &Input,
    route: &Route,
    state: &RouteState,
    job: usize,
) -> Option<Insertion> {
    let vehicle = &input.vehicles[route.vehicle];
    if !vehicle.can_serve(&input.jobs[job].skills) {
        return None;
    }

    match input.jobs[job].kind {
        JobKind::Single => evaluate_single(input, route, state, job),
        JobKind::Pickup => evaluate_pair_insertion(input, route, state, job),
        JobKind::Delivery => None,
    }
}

fn evaluate_single(input: &Input, route: &Route, state: &RouteState, job: usize) -> Option<Insertion> {
    let vehicle = &input.vehicles[route.vehicle];
    if vehicle.max_tasks.is_some_and(|max| route.steps.len() + 1 > max) {
        return None;
    }

    (0..=route.steps.len())
        .filter_map(|rank| {
            evaluate_single_insertion(input, route, state, job, rank)
                .map(|delta| Insertion { position: InsertionPosition::Single { rank }, delta })
        })
        .min_by_key(|insertion| (insertion.delta.cost, position_rank(insertion.position)))
}

/// Evaluates the insertion of a single job at a fixed rank: capacity via the load peaks, time
/// via the earliest and latest bounds, vehicle travel maxima via the evaluation delta. All
/// checks are O(1) for routes without breaks; break carrying routes replay the schedule.
pub fn evaluate_single_insertion(
    input: &Input,
    route: &Route,
    state: &RouteState,
    job: usize,
    rank: usize,
) -> Option<Eval> {
    let data = &input.jobs[job];
    debug_assert!(data.kind == JobKind::Single);

    let capacity = &input.vehicles[route.vehicle].capacity;

    let prefix_peak = if rank == 0 { &state.start_load } else { &state.fwd_peak[rank - 1] };
    if !(prefix_peak.clone() + &data.delivery).le(capacity) {
        return None;
    }
    let load_before = if rank == 0 { &state.start_load } else { &state.load_after[rank - 1] };
    if !(load_before.clone() + &data.pickup).le(capacity) {
        return None;
    }
    if rank < route.steps.len() && !(state.bwd_peak[rank].clone() + &data.pickup).le(capacity) {
        return None;
    }

    let delta = single_delta(input, route, data.location, rank);
    if !limits_ok(input, route, state, delta) {
        return None;
    }

    if !time_ok_single(input, route, state, job, rank) {
        return None;
    }

    Some(delta)
}

/// Evaluates the cheapest feasible insertion of a whole shipment into a route, scanning every
/// pickup and delivery rank pair with an O(1) capacity check per pair.
pub fn evaluate_pair_insertion(
    input: &Input,
    route: &Route,
    state: &RouteState,
    pickup: usize,
) -> Option<Insertion> {
    let pickup_data = &input.jobs[pickup];
    debug_assert!(pickup_data.kind == JobKind::Pickup);
    let delivery = pickup_data.partner.expect("paired at build");
    let delivery_data = &input.jobs[delivery];

    let vehicle = &input.vehicles[route.vehicle];
    if vehicle.max_tasks.is_some_and(|max| route.steps.len() + 2 > max) {
        return None;
    }

    let amount = &pickup_data.pickup;
    let capacity = &vehicle.capacity;
    let n = route.steps.len();

    let time_matters = state.time_constrained
        || pickup_data.is_time_constrained()
        || delivery_data.is_time_constrained();

    let mut best: Option<Insertion> = None;

    for i in 0..=n {
        let load_before = if i == 0 { &state.start_load } else { &state.load_after[i - 1] };
        if !(load_before.clone() + amount).le(capacity) {
            continue;
        }

        for j in i..=n {
            // old steps i..j ride between pickup and delivery, their loads rise by the amount
            if j > i && !(state.load_after[j - 1].clone() + amount).le(capacity) {
                break;
            }

            let delta = pair_delta(input, route, pickup_data.location, delivery_data.location, i, j);
            if !limits_ok(input, route, state, delta) {
                continue;
            }
            // the schedule replay is the expensive part, skip it for non improving pairs
            if best.is_some_and(|b| b.delta.cost <= delta.cost) {
                continue;
            }

            if time_matters && simulate(input, route.vehicle, &steps_with_pair(route, pickup, delivery, i, j)).is_none() {
                continue;
            }

            best = Some(Insertion {
                position: InsertionPosition::Pair { pickup_rank: i, delivery_rank: j + 1 },
                delta,
            });
        }
    }

    best
}

/// Returns the travel evaluation delta of removing the step at the given rank.
pub fn removal_delta(input: &Input, route: &Route, rank: usize) -> Eval {
    let location = input.jobs[route.steps[rank]].location;
    let prev = location_before(input, route, rank);
    let next = location_from(input, route, rank + 1);

    input.leg(route.vehicle, prev, next)
        - input.leg(route.vehicle, prev, Some(location))
        - input.leg(route.vehicle, Some(location), next)
}

/// Returns the location preceding the given rank: the previous step or the vehicle start.
pub fn location_before(input: &Input, route: &Route, rank: usize) -> Option<Location> {
    if rank == 0 {
        input.vehicles[route.vehicle].start
    } else {
        Some(input.jobs[route.steps[rank - 1]].location)
    }
}

/// Returns the location at the given rank, falling back to the vehicle end past the route.
pub fn location_from(input: &Input, route: &Route, rank: usize) -> Option<Location> {
    route.steps.get(rank).map(|&step| input.jobs[step].location).or(input.vehicles[route.vehicle].end)
}

/// Returns the travel evaluation delta of inserting one location at the given rank.
pub fn single_delta(input: &Input, route: &Route, location: Location, rank: usize) -> Eval {
    let prev = location_before(input, route, rank);
    let next = location_from(input, route, rank);

    input.leg(route.vehicle, prev, Some(location)) + input.leg(route.vehicle, Some(location), next)
        - input.leg(route.vehicle, prev, next)
}

fn pair_delta(
    input: &Input,
    route: &Route,
    pickup: Location,
    delivery: Location,
    i: usize,
    j: usize,
) -> Eval {
    let vehicle = route.vehicle;
    if i == j {
        let prev = location_before(input, route, i);
        let next = location_from(input, route, i);
        input.leg(vehicle, prev, Some(pickup))
            + input.leg(vehicle, Some(pickup), Some(delivery))
            + input.leg(vehicle, Some(delivery), next)
            - input.leg(vehicle, prev, next)
    } else {
        single_delta(input, route, pickup, i) + single_delta(input, route, delivery, j)
    }
}

/// Checks the vehicle travel maxima against the route totals shifted by a delta.
pub fn limits_ok(input: &Input, route: &Route, state: &RouteState, delta: Eval) -> bool {
    let vehicle = &input.vehicles[route.vehicle];

    vehicle.max_travel_time.map_or(true, |max| state.eval_total.duration + delta.duration <= max)
        && vehicle.max_distance.map_or(true, |max| state.eval_total.distance + delta.distance <= max)
}

/// Checks time feasibility of a single insertion: O(1) earliest and latest margins for break
/// free routes, an exact schedule replay otherwise.
fn time_ok_single(input: &Input, route: &Route, state: &RouteState, job: usize, rank: usize) -> bool {
    let vehicle = &input.vehicles[route.vehicle];
    let data = &input.jobs[job];

    if !state.time_constrained && !data.is_time_constrained() {
        return true;
    }
    if !vehicle.breaks.is_empty() {
        return simulate(input, route.vehicle, &steps_with_single(route, job, rank)).is_some();
    }

    let n = route.steps.len();
    let (prev_loc, depart) = if rank == 0 {
        (vehicle.start, vehicle.time_window.start)
    } else {
        let prev = &input.jobs[route.steps[rank - 1]];
        (Some(prev.location), state.earliest[rank - 1] + prev.service)
    };

    let arrival = depart + input.leg(route.vehicle, prev_loc, Some(data.location)).duration;
    let setup = if prev_loc == Some(data.location) { 0 } else { data.setup };
    let Some(start) = data.earliest_start(arrival + setup) else {
        return false;
    };

    if rank < n {
        let next = &input.jobs[route.steps[rank]];
        let travel = input.duration(route.vehicle, data.location, next.location);
        let setup_next = if data.location == next.location { 0 } else { next.setup };
        let ready = start + data.service + travel + setup_next;
        next.earliest_start(ready).is_some_and(|next_start| next_start <= state.latest[rank])
    } else {
        let final_leg = input.leg(route.vehicle, Some(data.location), vehicle.end);
        start + data.service + final_leg.duration <= vehicle.time_window.end
    }
}

/// Builds the step sequence with a single job spliced in.
pub(crate) fn steps_with_single(route: &Route, job: usize, rank: usize) -> Vec<usize> {
    let mut steps = route.steps.clone();
    steps.insert(rank, job);
    steps
}

/// Builds the step sequence with a shipment spliced in around the old ranks `i..j`.
pub(crate) fn steps_with_pair(route: &Route, pickup: usize, delivery: usize, i: usize, j: usize) -> Vec<usize> {
    let mut steps = Vec::with_capacity(route.steps.len() + 2);
    steps.extend_from_slice(&route.steps[..i]);
    steps.push(pickup);
    steps.extend_from_slice(&route.steps[i..j]);
    steps.push(delivery);
    steps.extend_from_slice(&route.steps[j..]);
    steps
}

fn position_rank(position: InsertionPosition) -> usize {
    match position {
        InsertionPosition::Single { rank } => rank,
        InsertionPosition::Pair { pickup_rank, .. } => pickup_rank,
    }
}
