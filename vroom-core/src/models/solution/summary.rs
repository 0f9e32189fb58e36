#[cfg(test)]
#[path = "../../../tests/unit/models/solution/summary_test.rs"]
mod summary_test;

use crate::models::common::{Amount, Cost, Distance, Duration, Location};
use crate::models::solution::{simulate, Route, Solution};
use crate::models::Input;

use super::schedule::start_load;

/// A solution step type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepType {
    /// Leaving the route start.
    Start,
    /// Arriving at the route end.
    End,
    /// A vehicle break.
    Break,
    /// A single job.
    Job,
    /// A shipment pickup.
    Pickup,
    /// A shipment delivery.
    Delivery,
}

/// One scheduled step of a route, ready for reporting.
#[derive(Clone, Debug)]
pub struct StepSummary {
    /// A step type.
    pub step_type: StepType,
    /// Id of the served job or break, absent for start and end steps.
    pub id: Option<u64>,
    /// Step location, absent for breaks taken en route.
    pub location: Option<Location>,
    /// Charged setup time.
    pub setup: Duration,
    /// Service duration.
    pub service: Duration,
    /// Waiting before service.
    pub waiting_time: Duration,
    /// Arrival time.
    pub arrival: Duration,
    /// Travel duration accumulated when reaching the step.
    pub duration: Duration,
    /// Travel distance accumulated when reaching the step.
    pub distance: Distance,
    /// Vehicle load after the step.
    pub load: Amount,
    /// A user description echoed from the input.
    pub description: String,
}

/// A scheduled route ready for reporting.
#[derive(Clone, Debug)]
pub struct RouteSummary {
    /// The serving vehicle id.
    pub vehicle: u64,
    /// User visible route cost.
    pub cost: Cost,
    /// Total delivered amount.
    pub delivery: Amount,
    /// Total picked up amount.
    pub pickup: Amount,
    /// Total charged setup time.
    pub setup: Duration,
    /// Total service time, breaks included.
    pub service: Duration,
    /// Total travel duration.
    pub duration: Duration,
    /// Total waiting time.
    pub waiting_time: Duration,
    /// Sum of served job priorities.
    pub priority: u64,
    /// Total travel distance.
    pub distance: Distance,
    /// Scheduled steps.
    pub steps: Vec<StepSummary>,
    /// A user description echoed from the input.
    pub description: String,
}

/// An unassigned task for reporting.
#[derive(Clone, Debug)]
pub struct UnassignedSummary {
    /// The task id.
    pub id: u64,
    /// A step type describing the task kind.
    pub step_type: StepType,
    /// The task location.
    pub location: Location,
    /// A user description echoed from the input.
    pub description: String,
}

/// A complete scheduled solution ready for reporting.
#[derive(Clone, Debug)]
pub struct SolutionSummary {
    /// Total user visible cost.
    pub cost: Cost,
    /// Scheduled routes, unused vehicles omitted.
    pub routes: Vec<RouteSummary>,
    /// Unassigned tasks.
    pub unassigned: Vec<UnassignedSummary>,
    /// Total delivered amount.
    pub delivery: Amount,
    /// Total picked up amount.
    pub pickup: Amount,
    /// Total charged setup time.
    pub setup: Duration,
    /// Total service time.
    pub service: Duration,
    /// Total travel duration.
    pub duration: Duration,
    /// Total waiting time.
    pub waiting_time: Duration,
    /// Sum of assigned job priorities.
    pub priority: u64,
    /// Total travel distance.
    pub distance: Distance,
    /// Whether distances were part of the input and should be reported.
    pub report_distances: bool,
}

impl SolutionSummary {
    /// Schedules every used route of the solution and aggregates the reporting totals.
    pub fn new(input: &Input, solution: &Solution) -> Self {
        let routes: Vec<_> =
            solution.routes.iter().filter(|route| !route.is_empty()).map(|route| summarize_route(input, route)).collect();

        let unassigned = solution
            .unassigned
            .iter()
            .map(|&index| {
                let job = &input.jobs[index];
                UnassignedSummary {
                    id: job.id,
                    step_type: job_step_type(job),
                    location: job.location,
                    description: job.description.clone(),
                }
            })
            .collect();

        let mut summary = SolutionSummary {
            cost: routes.iter().map(|r| r.cost).sum(),
            delivery: sum_amounts(input, routes.iter().map(|r| &r.delivery)),
            pickup: sum_amounts(input, routes.iter().map(|r| &r.pickup)),
            setup: routes.iter().map(|r| r.setup).sum(),
            service: routes.iter().map(|r| r.service).sum(),
            duration: routes.iter().map(|r| r.duration).sum(),
            waiting_time: routes.iter().map(|r| r.waiting_time).sum(),
            priority: routes.iter().map(|r| r.priority).sum(),
            distance: routes.iter().map(|r| r.distance).sum(),
            report_distances: input.report_distances,
            routes,
            unassigned,
        };
        summary.routes.sort_by_key(|r| r.vehicle);

        summary
    }
}

fn job_step_type(job: &crate::models::problem::Job) -> StepType {
    match job.kind {
        crate::models::problem::JobKind::Single => StepType::Job,
        crate::models::problem::JobKind::Pickup => StepType::Pickup,
        crate::models::problem::JobKind::Delivery => StepType::Delivery,
    }
}

fn sum_amounts<'a>(input: &Input, amounts: impl Iterator<Item = &'a Amount>) -> Amount {
    amounts.fold(Amount::new(input.amount_size), |acc, amount| acc + amount)
}

fn summarize_route(input: &Input, route: &Route) -> RouteSummary {
    let vehicle = &input.vehicles[route.vehicle];
    let schedule = simulate(input, route.vehicle, &route.steps)
        .unwrap_or_else(|| panic!("unschedulable route for vehicle {}", vehicle.id));

    let mut steps = Vec::with_capacity(route.steps.len() + vehicle.breaks.len() + 2);
    let mut load = start_load(input, &route.steps);
    let mut travel = (0, 0);
    let mut location = vehicle.start;

    if let Some(start) = vehicle.start {
        steps.push(StepSummary {
            step_type: StepType::Start,
            id: None,
            location: Some(start),
            setup: 0,
            service: 0,
            waiting_time: 0,
            arrival: schedule.departure,
            duration: 0,
            distance: 0,
            load: load.clone(),
            description: String::default(),
        });
    }

    let emit_breaks_at = |leg: usize, steps: &mut Vec<StepSummary>, load: &Amount, travel: (Duration, Distance)| {
        schedule.break_leg.iter().enumerate().filter(|(_, &at)| at == leg).for_each(|(index, _)| {
            let brk = &vehicle.breaks[index];
            steps.push(StepSummary {
                step_type: StepType::Break,
                id: Some(brk.id),
                location: None,
                setup: 0,
                service: brk.service,
                waiting_time: schedule.break_waiting[index],
                arrival: schedule.break_start[index] - schedule.break_waiting[index],
                duration: travel.0,
                distance: travel.1,
                load: load.clone(),
                description: brk.description.clone(),
            });
        });
    };

    for (rank, &step) in route.steps.iter().enumerate() {
        emit_breaks_at(rank, &mut steps, &load, travel);

        let job = &input.jobs[step];
        let leg = input.leg(route.vehicle, location, Some(job.location));
        travel = (travel.0 + leg.duration, travel.1 + leg.distance);
        location = Some(job.location);

        load += &job.pickup;
        load -= &job.delivery;

        steps.push(StepSummary {
            step_type: job_step_type(job),
            id: Some(job.id),
            location: Some(job.location),
            setup: schedule.setup[rank],
            service: job.service,
            waiting_time: schedule.waiting[rank],
            arrival: schedule.arrival[rank],
            duration: travel.0,
            distance: travel.1,
            load: load.clone(),
            description: job.description.clone(),
        });
    }

    emit_breaks_at(route.steps.len(), &mut steps, &load, travel);

    if let Some(end) = vehicle.end {
        let leg = input.leg(route.vehicle, location, Some(end));
        travel = (travel.0 + leg.duration, travel.1 + leg.distance);
        steps.push(StepSummary {
            step_type: StepType::End,
            id: None,
            location: Some(end),
            setup: 0,
            service: 0,
            waiting_time: 0,
            arrival: schedule.end_time,
            duration: travel.0,
            distance: travel.1,
            load: load.clone(),
            description: String::default(),
        });
    }

    let cost = if input.has_custom_costs(route.vehicle) {
        let edge_costs: Cost = route_edge_costs(input, route);
        vehicle.costs.fixed + edge_costs
    } else {
        input.user_route_cost(route.vehicle, schedule.travel_duration, schedule.travel_distance)
    };

    RouteSummary {
        vehicle: vehicle.id,
        cost,
        delivery: sum_amounts(input, route.steps.iter().map(|&s| &input.jobs[s].delivery)),
        pickup: sum_amounts(input, route.steps.iter().map(|&s| &input.jobs[s].pickup)),
        setup: schedule.setup_total,
        service: schedule.service_total,
        duration: schedule.travel_duration,
        waiting_time: schedule.waiting_total,
        priority: route.steps.iter().map(|&s| input.jobs[s].priority as u64).sum(),
        distance: schedule.travel_distance,
        steps,
        description: vehicle.description.clone(),
    }
}

fn route_edge_costs(input: &Input, route: &Route) -> Cost {
    let vehicle = &input.vehicles[route.vehicle];
    let locations: Vec<_> = vehicle
        .start
        .into_iter()
        .chain(route.steps.iter().map(|&s| input.jobs[s].location))
        .chain(vehicle.end)
        .collect();

    locations.windows(2).map(|pair| input.cost(route.vehicle, pair[0], pair[1])).sum()
}
