#[cfg(test)]
#[path = "../../../tests/unit/models/solution/schedule_test.rs"]
mod schedule_test;

use crate::models::common::{Amount, Distance, Duration, Location};
use crate::models::Input;

/// An exact earliest service schedule of one route, breaks included. This simulation is the
/// single source of truth for time feasibility: the route state cache derives its earliest
/// bounds from it and reporting reads it verbatim.
#[derive(Clone, Debug, Default)]
pub struct RouteSchedule {
    /// Arrival time per rank.
    pub arrival: Vec<Duration>,
    /// Service start per rank.
    pub service_start: Vec<Duration>,
    /// Waiting before service per rank.
    pub waiting: Vec<Duration>,
    /// Setup actually charged per rank, zero when the previous step shares the location.
    pub setup: Vec<Duration>,
    /// For each vehicle break, the leg it occupies: leg `k` precedes the travel towards rank
    /// `k`, leg `steps.len()` precedes the final travel towards the route end.
    pub break_leg: Vec<usize>,
    /// Break start time per vehicle break.
    pub break_start: Vec<Duration>,
    /// Waiting before each break.
    pub break_waiting: Vec<Duration>,
    /// Departure time from the route start.
    pub departure: Duration,
    /// Completion time of the route.
    pub end_time: Duration,
    /// Accumulated travel duration.
    pub travel_duration: Duration,
    /// Accumulated travel distance.
    pub travel_distance: Distance,
    /// Accumulated charged setup time.
    pub setup_total: Duration,
    /// Accumulated job and break service time.
    pub service_total: Duration,
    /// Accumulated waiting time.
    pub waiting_total: Duration,
}

/// Returns the load carried when leaving the route start: the deliveries of all single jobs
/// served by the route. Shipment amounts come on board at their pickups instead.
pub(crate) fn start_load(input: &Input, steps: &[usize]) -> Amount {
    steps
        .iter()
        .map(|&step| &input.jobs[step])
        .filter(|job| job.kind == crate::models::problem::JobKind::Single)
        .fold(Amount::new(input.amount_size), |acc, job| acc + &job.delivery)
}

/// Computes the exact earliest schedule of serving `steps` with the given vehicle, or `None`
/// when no feasible schedule exists. Breaks are absorbed greedily: each break is deferred past
/// the next activity when some of its time windows still admits that, and taken on the spot
/// otherwise.
pub fn simulate(input: &Input, vehicle: usize, steps: &[usize]) -> Option<RouteSchedule> {
    let v = &input.vehicles[vehicle];
    let shift = v.time_window;

    let mut schedule = RouteSchedule { departure: shift.start, end_time: shift.start, ..Default::default() };

    // an unused vehicle takes no breaks
    if steps.is_empty() {
        return Some(schedule);
    }

    let mut t = shift.start;
    let mut loc = v.start;
    let mut load = start_load(input, steps);
    let mut next_break = 0_usize;

    for (rank, &step) in steps.iter().enumerate() {
        let job = &input.jobs[step];

        take_due_breaks(input, vehicle, &mut next_break, &mut t, &load, rank, &mut schedule, |depart| {
            completion_of(input, vehicle, loc, depart, step)
        })?;

        let leg = input.leg(vehicle, loc, Some(job.location));
        let arrival = t + leg.duration;
        schedule.travel_duration += leg.duration;
        schedule.travel_distance += leg.distance;

        let setup = if loc == Some(job.location) { 0 } else { job.setup };
        let ready = arrival + setup;
        let start = job.earliest_start(ready)?;

        schedule.arrival.push(arrival);
        schedule.setup.push(setup);
        schedule.service_start.push(start);
        schedule.waiting.push(start - ready);
        schedule.setup_total += setup;
        schedule.service_total += job.service;
        schedule.waiting_total += start - ready;

        t = start + job.service;
        loc = Some(job.location);
        load += &job.pickup;
        load -= &job.delivery;
    }

    // remaining breaks happen at the last served location before heading to the route end
    take_due_breaks(input, vehicle, &mut next_break, &mut t, &load, steps.len(), &mut schedule, |_| None)?;

    let leg = input.leg(vehicle, loc, v.end);
    schedule.travel_duration += leg.duration;
    schedule.travel_distance += leg.distance;
    t += leg.duration;

    if t > shift.end {
        return None;
    }
    schedule.end_time = t;

    Some(schedule)
}

/// Takes every break which cannot be deferred past the next activity. `defer_probe` reports the
/// completion time of the next activity when departing at the given time, or `None` when there
/// is no further deferral opportunity.
#[allow(clippy::too_many_arguments)]
fn take_due_breaks(
    input: &Input,
    vehicle: usize,
    next_break: &mut usize,
    t: &mut Duration,
    load: &Amount,
    leg: usize,
    schedule: &mut RouteSchedule,
    defer_probe: impl Fn(Duration) -> Option<Duration>,
) -> Option<()> {
    let breaks = &input.vehicles[vehicle].breaks;

    while let Some(brk) = breaks.get(*next_break) {
        let deferrable = defer_probe(*t).is_some_and(|later| brk.earliest_start(later).is_some());
        if deferrable {
            break;
        }

        let start = brk.earliest_start(*t)?;
        if let Some(max_load) = brk.max_load.as_ref() {
            if !load.le(max_load) {
                return None;
            }
        }

        schedule.break_leg.push(leg);
        schedule.break_start.push(start);
        schedule.break_waiting.push(start - *t);
        schedule.service_total += brk.service;
        schedule.waiting_total += start - *t;

        *t = start + brk.service;
        *next_break += 1;
    }

    Some(())
}

/// Returns the completion time of serving `step` when departing `from` at `depart`, or `None`
/// when the job cannot be scheduled from there at all.
fn completion_of(
    input: &Input,
    vehicle: usize,
    from: Option<Location>,
    depart: Duration,
    step: usize,
) -> Option<Duration> {
    let job = &input.jobs[step];
    let leg = input.leg(vehicle, from, Some(job.location));
    let setup = if from == Some(job.location) { 0 } else { job.setup };
    let start = job.earliest_start(depart + leg.duration + setup)?;

    Some(start + job.service)
}
