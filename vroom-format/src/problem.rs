#[cfg(test)]
#[path = "../tests/unit/problem_test.rs"]
mod problem_test;

use crate::CoordIndex;
use hashbrown::HashMap;
use serde::Deserialize;
use std::io::{BufReader, Read};
use vroom_core::models::common::{Amount, TimeWindow};
use vroom_core::models::problem::{
    Break, ForcedService, Job as CoreJob, JobKind, Matrix, StepRef, Vehicle as CoreVehicle, VehicleCosts, VehicleStep,
};
use vroom_core::models::{Input, InputBuilder};
use vroom_core::Error;

/// The default routing profile, used when a vehicle does not name one.
pub const DEFAULT_PROFILE: &str = "car";

/// A job definition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Job {
    /// Job id.
    pub id: u64,
    /// Job location as `[lon, lat]`.
    pub location: Option<[f64; 2]>,
    /// Job location as an index in the travel matrices.
    pub location_index: Option<usize>,
    /// Setup duration.
    pub setup: Option<i64>,
    /// Service duration.
    pub service: Option<i64>,
    /// Delivered amount.
    pub delivery: Option<Vec<i64>>,
    /// Deprecated alias for `delivery`.
    pub amount: Option<Vec<i64>>,
    /// Picked up amount.
    pub pickup: Option<Vec<i64>>,
    /// Required skills.
    pub skills: Option<Vec<u32>>,
    /// Assignment priority in `0..=100`.
    pub priority: Option<u32>,
    /// Allowed service start windows.
    pub time_windows: Option<Vec<[i64; 2]>>,
    /// A free form description.
    pub description: Option<String>,
}

/// One half of a shipment, shaped like a job without amounts.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ShipmentStep {
    /// Step id.
    pub id: u64,
    /// Step location as `[lon, lat]`.
    pub location: Option<[f64; 2]>,
    /// Step location as an index in the travel matrices.
    pub location_index: Option<usize>,
    /// Setup duration.
    pub setup: Option<i64>,
    /// Service duration.
    pub service: Option<i64>,
    /// Allowed service start windows.
    pub time_windows: Option<Vec<[i64; 2]>>,
    /// A free form description.
    pub description: Option<String>,
}

/// A pickup and delivery shipment.
#[derive(Clone, Debug, Deserialize)]
pub struct Shipment {
    /// The pickup half.
    pub pickup: ShipmentStep,
    /// The delivery half.
    pub delivery: ShipmentStep,
    /// The transported amount.
    pub amount: Option<Vec<i64>>,
    /// Required skills.
    pub skills: Option<Vec<u32>>,
    /// Assignment priority in `0..=100`.
    pub priority: Option<u32>,
}

/// A vehicle break definition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VehicleBreak {
    /// Break id.
    pub id: u64,
    /// Allowed break start windows.
    pub time_windows: Option<Vec<[i64; 2]>>,
    /// Break duration.
    pub service: Option<i64>,
    /// Maximum carried load during the break.
    pub max_load: Option<Vec<i64>>,
    /// A free form description.
    pub description: Option<String>,
}

/// Vehicle cost parameters.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VehicleCostsInput {
    /// Cost of using the vehicle at all.
    pub fixed: Option<i64>,
    /// Cost per travel hour.
    pub per_hour: Option<i64>,
    /// Cost per travel kilometer.
    pub per_km: Option<i64>,
}

/// A forced vehicle step.
#[derive(Clone, Debug, Deserialize)]
pub struct VehicleStepInput {
    /// Step type: start, end, job, pickup, delivery or break.
    #[serde(rename = "type")]
    pub step_type: String,
    /// Referenced id, required except for start and end.
    pub id: Option<u64>,
    /// Service must start exactly then.
    pub service_at: Option<i64>,
    /// Service must start at or after.
    pub service_after: Option<i64>,
    /// Service must start before.
    pub service_before: Option<i64>,
}

/// A vehicle definition.
#[derive(Clone, Debug, Deserialize)]
pub struct Vehicle {
    /// Vehicle id.
    pub id: u64,
    /// Start location as `[lon, lat]`.
    pub start: Option<[f64; 2]>,
    /// Start location as an index in the travel matrices.
    pub start_index: Option<usize>,
    /// End location as `[lon, lat]`.
    pub end: Option<[f64; 2]>,
    /// End location as an index in the travel matrices.
    pub end_index: Option<usize>,
    /// Routing profile name.
    pub profile: Option<String>,
    /// Carrying capacity.
    pub capacity: Option<Vec<i64>>,
    /// Provided skills.
    pub skills: Option<Vec<u32>>,
    /// Working shift as a single time window.
    pub time_window: Option<[i64; 2]>,
    /// Breaks to take during the shift.
    pub breaks: Option<Vec<VehicleBreak>>,
    /// A free form description.
    pub description: Option<String>,
    /// Cost parameters.
    pub cost: Option<VehicleCostsInput>,
    /// Duration scale, higher is faster.
    pub speed_factor: Option<f64>,
    /// Maximum amount of served tasks.
    pub max_tasks: Option<usize>,
    /// Maximum accumulated travel time.
    pub max_travel_time: Option<i64>,
    /// Maximum accumulated travel distance.
    pub max_distance: Option<i64>,
    /// Forced steps.
    pub steps: Option<Vec<VehicleStepInput>>,
}

/// Travel matrices of one profile.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileMatricesInput {
    /// Travel durations.
    pub durations: Option<Vec<Vec<i64>>>,
    /// Travel distances.
    pub distances: Option<Vec<Vec<i64>>>,
    /// Custom travel costs.
    pub costs: Option<Vec<Vec<i64>>>,
}

/// The top level problem document.
#[derive(Clone, Debug, Deserialize)]
pub struct Problem {
    /// Tasks with a single location.
    pub jobs: Option<Vec<Job>>,
    /// Pickup and delivery shipments.
    pub shipments: Option<Vec<Shipment>>,
    /// The fleet.
    pub vehicles: Vec<Vehicle>,
    /// Travel matrices keyed by profile.
    pub matrices: Option<HashMap<String, ProfileMatricesInput>>,
    /// Deprecated: durations matrix of the default profile.
    pub matrix: Option<Vec<Vec<i64>>>,
}

/// Reads and validates a problem document, returning the core input together with the
/// coordinate index used to echo locations back into the solution.
pub fn read_problem<R: Read>(reader: BufReader<R>) -> Result<(Input, CoordIndex), Error> {
    let problem: Problem =
        serde_json::from_reader(reader).map_err(|err| Error::Input(format!("invalid json: {err}")))?;

    parse_problem(problem)
}

/// Converts a deserialized problem into the validated core input.
pub fn parse_problem(problem: Problem) -> Result<(Input, CoordIndex), Error> {
    let amount_size = problem.vehicles.first().and_then(|v| v.capacity.as_ref()).map_or(0, |c| c.len());
    let has_matrices = problem.matrices.is_some() || problem.matrix.is_some();

    let mut builder = InputBuilder::new(amount_size);
    let mut coords = CoordIndex::default();

    let mut locate = |location: Option<[f64; 2]>, index: Option<usize>, what: &str| -> Result<usize, Error> {
        match (index, location) {
            (Some(index), Some(coordinates)) => {
                coords.set(index, coordinates);
                Ok(index)
            }
            (Some(index), None) => {
                coords.ensure(index);
                Ok(index)
            }
            (None, Some(coordinates)) if !has_matrices => Ok(coords.intern(coordinates)),
            (None, Some(_)) => {
                Err(Error::Input(format!("missing location index for {what} while matrices are given")))
            }
            (None, None) => Err(Error::Input(format!("missing location for {what}"))),
        }
    };

    for job in problem.jobs.unwrap_or_default() {
        let location = locate(job.location, job.location_index, &format!("job {}", job.id))?;
        let delivery = job.delivery.or(job.amount).map_or_else(|| Amount::new(amount_size), Amount::from);
        let pickup = job.pickup.map_or_else(|| Amount::new(amount_size), Amount::from);

        builder.add_job(CoreJob {
            id: job.id,
            kind: JobKind::Single,
            location,
            setup: job.setup.unwrap_or(0),
            service: job.service.unwrap_or(0),
            delivery,
            pickup,
            skills: job.skills.unwrap_or_default().into_iter().collect(),
            priority: job.priority.unwrap_or(0),
            time_windows: parse_time_windows(job.time_windows),
            description: job.description.unwrap_or_default(),
            partner: None,
        });
    }

    for shipment in problem.shipments.unwrap_or_default() {
        let amount = shipment.amount.map_or_else(|| Amount::new(amount_size), Amount::from);
        let skills: hashbrown::HashSet<u32> = shipment.skills.unwrap_or_default().into_iter().collect();
        let priority = shipment.priority.unwrap_or(0);

        let mut convert = |step: ShipmentStep, kind: JobKind, what: &str| -> Result<CoreJob, Error> {
            let location = locate(step.location, step.location_index, &format!("{what} {}", step.id))?;
            let (delivery, pickup) = match kind {
                JobKind::Pickup => (Amount::new(amount_size), amount.clone()),
                _ => (amount.clone(), Amount::new(amount_size)),
            };
            Ok(CoreJob {
                id: step.id,
                kind,
                location,
                setup: step.setup.unwrap_or(0),
                service: step.service.unwrap_or(0),
                delivery,
                pickup,
                skills: skills.clone(),
                priority,
                time_windows: parse_time_windows(step.time_windows),
                description: step.description.unwrap_or_default(),
                partner: None,
            })
        };

        let pickup = convert(shipment.pickup, JobKind::Pickup, "pickup")?;
        let delivery = convert(shipment.delivery, JobKind::Delivery, "delivery")?;
        builder.add_shipment(pickup, delivery);
    }

    for vehicle in problem.vehicles {
        let start = match (vehicle.start_index, vehicle.start) {
            (None, None) => None,
            (index, location) => Some(locate(location, index, &format!("start of vehicle {}", vehicle.id))?),
        };
        let end = match (vehicle.end_index, vehicle.end) {
            (None, None) => None,
            (index, location) => Some(locate(location, index, &format!("end of vehicle {}", vehicle.id))?),
        };

        let profile = builder.profile(vehicle.profile.as_deref().unwrap_or(DEFAULT_PROFILE));
        let costs = vehicle.cost.unwrap_or_default();

        let mut breaks: Vec<Break> = vehicle
            .breaks
            .unwrap_or_default()
            .into_iter()
            .map(|brk| Break {
                id: brk.id,
                time_windows: parse_time_windows(brk.time_windows),
                service: brk.service.unwrap_or(0),
                max_load: brk.max_load.map(Amount::from),
                description: brk.description.unwrap_or_default(),
            })
            .collect();
        breaks.sort_by_key(|brk| (brk.time_windows[0].start, brk.time_windows[0].end));

        let steps = vehicle
            .steps
            .unwrap_or_default()
            .into_iter()
            .map(|step| parse_vehicle_step(step, vehicle.id))
            .collect::<Result<Vec<_>, _>>()?;

        builder.add_vehicle(CoreVehicle {
            id: vehicle.id,
            start,
            end,
            profile,
            capacity: vehicle.capacity.map_or_else(|| Amount::new(amount_size), Amount::from),
            skills: vehicle.skills.unwrap_or_default().into_iter().collect(),
            time_window: vehicle.time_window.map_or_else(TimeWindow::max, |tw| TimeWindow::new(tw[0], tw[1])),
            breaks,
            costs: VehicleCosts {
                fixed: costs.fixed.unwrap_or(0),
                per_hour: costs.per_hour.unwrap_or(3600),
                per_km: costs.per_km.unwrap_or(0),
            },
            speed_factor: vehicle.speed_factor.unwrap_or(1.),
            max_tasks: vehicle.max_tasks,
            max_travel_time: vehicle.max_travel_time,
            max_distance: vehicle.max_distance,
            steps,
            description: vehicle.description.unwrap_or_default(),
        });
    }

    for (name, matrices) in problem.matrices.unwrap_or_default() {
        let profile = builder.profile(&name);
        if let Some(durations) = matrices.durations {
            builder.durations(profile, parse_matrix(durations, "durations")?);
        }
        if let Some(distances) = matrices.distances {
            builder.distances(profile, parse_matrix(distances, "distances")?);
        }
        if let Some(costs) = matrices.costs {
            builder.costs(profile, parse_matrix(costs, "costs")?);
        }
    }
    if let Some(matrix) = problem.matrix {
        let profile = builder.profile(DEFAULT_PROFILE);
        builder.durations(profile, parse_matrix(matrix, "matrix")?);
    }

    builder.build().map(|input| (input, coords))
}

fn parse_time_windows(windows: Option<Vec<[i64; 2]>>) -> Vec<TimeWindow> {
    let mut windows: Vec<TimeWindow> = match windows {
        None => return vec![TimeWindow::max()],
        Some(windows) if windows.is_empty() => return vec![TimeWindow::max()],
        Some(windows) => windows.into_iter().map(|tw| TimeWindow::new(tw[0], tw[1])).collect(),
    };
    windows.sort_by_key(|tw| (tw.start, tw.end));
    windows
}

fn parse_matrix(rows: Vec<Vec<i64>>, what: &str) -> Result<Matrix<i64>, Error> {
    let size = rows.len();
    let mut data = Vec::with_capacity(size * size);
    for row in rows {
        if row.len() != size {
            return Err(Error::Input(format!("unexpected {what} matrix line length")));
        }
        data.extend(row);
    }

    Matrix::from_data(size, data).ok_or_else(|| Error::Input(format!("malformed {what} matrix")))
}

fn parse_vehicle_step(step: VehicleStepInput, vehicle: u64) -> Result<VehicleStep, Error> {
    let forced = ForcedService { at: step.service_at, after: step.service_after, before: step.service_before };

    let kind = match (step.step_type.as_str(), step.id) {
        ("start", _) => StepRef::Start,
        ("end", _) => StepRef::End,
        ("job", Some(id)) => StepRef::Job(id),
        ("pickup", Some(id)) => StepRef::Pickup(id),
        ("delivery", Some(id)) => StepRef::Delivery(id),
        ("break", Some(id)) => StepRef::Break(id),
        (kind @ ("job" | "pickup" | "delivery" | "break"), None) => {
            return Err(Error::Input(format!("missing id for {kind} step of vehicle {vehicle}")))
        }
        _ => return Err(Error::Input(format!("invalid type in steps for vehicle {vehicle}"))),
    };

    Ok(VehicleStep { kind, forced })
}
