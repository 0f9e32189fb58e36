#[cfg(test)]
#[path = "../tests/unit/solution_test.rs"]
mod solution_test;

use crate::CoordIndex;
use serde::Serialize;
use std::io::{BufWriter, Write};
use vroom_core::models::solution::{SolutionSummary, StepType};
use vroom_core::Error;

/// Time spent in each solving stage, in milliseconds.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ComputingTimes {
    /// Input parsing and validation.
    pub loading: u64,
    /// Solving proper.
    pub solving: u64,
    /// External routing requests; always zero when matrices come with the input.
    pub routing: u64,
}

#[derive(Serialize)]
struct SummaryOutput {
    cost: i64,
    routes: usize,
    unassigned: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    delivery: Vec<i64>,
    /// Deprecated alias of `delivery`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    amount: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pickup: Vec<i64>,
    setup: i64,
    service: i64,
    duration: i64,
    waiting_time: i64,
    priority: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<i64>,
    violations: Vec<serde_json::Value>,
    computing_times: ComputingTimes,
}

#[derive(Serialize)]
struct UnassignedOutput {
    id: u64,
    #[serde(rename = "type")]
    step_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<[f64; 2]>,
    location_index: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
}

#[derive(Serialize)]
struct StepOutput {
    #[serde(rename = "type")]
    step_type: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    setup: i64,
    service: i64,
    waiting_time: i64,
    /// Deprecated alias of `id` for job steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    job: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    load: Vec<i64>,
    arrival: i64,
    duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<i64>,
    violations: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct RouteOutput {
    vehicle: u64,
    cost: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    delivery: Vec<i64>,
    /// Deprecated alias of `delivery`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    amount: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pickup: Vec<i64>,
    setup: i64,
    service: i64,
    duration: i64,
    waiting_time: i64,
    priority: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<i64>,
    steps: Vec<StepOutput>,
    violations: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct SolutionOutput {
    code: i32,
    summary: SummaryOutput,
    unassigned: Vec<UnassignedOutput>,
    routes: Vec<RouteOutput>,
}

#[derive(Serialize)]
struct ErrorOutput {
    code: i32,
    error: String,
}

/// Writes the scheduled solution as json.
pub fn write_solution<W: Write>(
    summary: &SolutionSummary,
    coords: &CoordIndex,
    computing_times: ComputingTimes,
    writer: &mut BufWriter<W>,
) -> Result<(), Error> {
    let distances = summary.report_distances;

    let output = SolutionOutput {
        code: 0,
        summary: SummaryOutput {
            cost: summary.cost,
            routes: summary.routes.len(),
            unassigned: summary.unassigned.len(),
            delivery: summary.delivery.as_slice().to_vec(),
            amount: summary.delivery.as_slice().to_vec(),
            pickup: summary.pickup.as_slice().to_vec(),
            setup: summary.setup,
            service: summary.service,
            duration: summary.duration,
            waiting_time: summary.waiting_time,
            priority: summary.priority,
            distance: distances.then_some(summary.distance),
            violations: vec![],
            computing_times,
        },
        unassigned: summary
            .unassigned
            .iter()
            .map(|job| UnassignedOutput {
                id: job.id,
                step_type: step_type_name(job.step_type),
                location: coords.get(job.location),
                location_index: job.location,
                description: job.description.clone(),
            })
            .collect(),
        routes: summary
            .routes
            .iter()
            .map(|route| RouteOutput {
                vehicle: route.vehicle,
                cost: route.cost,
                description: route.description.clone(),
                delivery: route.delivery.as_slice().to_vec(),
                amount: route.delivery.as_slice().to_vec(),
                pickup: route.pickup.as_slice().to_vec(),
                setup: route.setup,
                service: route.service,
                duration: route.duration,
                waiting_time: route.waiting_time,
                priority: route.priority,
                distance: distances.then_some(route.distance),
                steps: route
                    .steps
                    .iter()
                    .map(|step| StepOutput {
                        step_type: step_type_name(step.step_type),
                        description: step.description.clone(),
                        location: step.location.and_then(|location| coords.get(location)),
                        location_index: step.location,
                        id: step.id,
                        setup: step.setup,
                        service: step.service,
                        waiting_time: step.waiting_time,
                        job: (step.step_type == StepType::Job).then(|| step.id).flatten(),
                        load: step.load.as_slice().to_vec(),
                        arrival: step.arrival,
                        duration: step.duration,
                        distance: distances.then_some(step.distance),
                        violations: vec![],
                    })
                    .collect(),
                violations: vec![],
            })
            .collect(),
    };

    serde_json::to_writer(writer, &output).map_err(|err| Error::Internal(format!("cannot write solution: {err}")))
}

/// Writes an error document as json.
pub fn write_error<W: Write>(error: &Error, writer: &mut BufWriter<W>) -> Result<(), Error> {
    let output = ErrorOutput { code: error.code(), error: error.to_string() };

    serde_json::to_writer(writer, &output).map_err(|err| Error::Internal(format!("cannot write error: {err}")))
}

fn step_type_name(step_type: StepType) -> &'static str {
    match step_type {
        StepType::Start => "start",
        StepType::End => "end",
        StepType::Break => "break",
        StepType::Job => "job",
        StepType::Pickup => "pickup",
        StepType::Delivery => "delivery",
    }
}
