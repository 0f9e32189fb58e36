#[cfg(test)]
#[path = "../../tests/unit/models/input_test.rs"]
mod input_test;

use crate::models::common::{Amount, Cost, Distance, Duration, Eval, Location, Priority};
use crate::models::problem::{round_half_away, Job, JobKind, Matrix, ProfileMatrices, StepRef, Vehicle};
use crate::Error;
use hashbrown::HashMap;

/// An upper bound for job priorities.
pub(crate) const MAX_PRIORITY: Priority = 100;

/// An immutable problem definition: jobs, vehicles and travel matrices, all location references
/// resolved to matrix indices. Shared read only across solver runs.
#[derive(Debug)]
pub struct Input {
    /// All tasks, shipment halves included.
    pub jobs: Vec<Job>,
    /// The fleet.
    pub vehicles: Vec<Vehicle>,
    /// Interned profile names, indexed by `Vehicle::profile`.
    pub profiles: Vec<String>,
    /// The common length of every amount in the problem.
    pub amount_size: usize,
    /// Whether distances were supplied and should be reported back.
    pub report_distances: bool,
    matrices: Vec<ProfileMatrices>,
    single_index: HashMap<u64, usize>,
    pickup_index: HashMap<u64, usize>,
    delivery_index: HashMap<u64, usize>,
}

impl Input {
    /// Returns travel duration between two locations for the given vehicle, profile durations
    /// scaled down by the vehicle speed factor.
    pub fn duration(&self, vehicle: usize, from: Location, to: Location) -> Duration {
        let v = &self.vehicles[vehicle];
        let raw = self.matrices[v.profile].durations.as_ref().map_or(0, |m| m[from][to]);
        if v.speed_factor == 1. {
            raw
        } else {
            round_half_away(raw as f64 / v.speed_factor)
        }
    }

    /// Returns travel distance between two locations for the given vehicle.
    pub fn distance(&self, vehicle: usize, from: Location, to: Location) -> Distance {
        let v = &self.vehicles[vehicle];
        self.matrices[v.profile].distances.as_ref().map_or(0, |m| m[from][to])
    }

    /// Returns internal travel cost between two locations for the given vehicle: the profile
    /// costs matrix when supplied, otherwise synthesized from the vehicle cost parameters.
    pub fn cost(&self, vehicle: usize, from: Location, to: Location) -> Cost {
        let v = &self.vehicles[vehicle];
        if let Some(costs) = self.matrices[v.profile].costs.as_ref() {
            costs[from][to]
        } else {
            let duration = self.duration(vehicle, from, to);
            let distance = self.distance(vehicle, from, to);
            synthesized_cost(v.costs.per_hour, v.costs.per_km, duration, distance)
        }
    }

    /// Returns the travel evaluation of one edge for the given vehicle.
    pub fn eval(&self, vehicle: usize, from: Location, to: Location) -> Eval {
        Eval::new(
            self.cost(vehicle, from, to),
            self.duration(vehicle, from, to),
            self.distance(vehicle, from, to),
        )
    }

    /// Returns the travel evaluation of a leg where either side may be absent, as around an
    /// open route's missing start or end.
    pub fn leg(&self, vehicle: usize, from: Option<Location>, to: Option<Location>) -> Eval {
        match (from, to) {
            (Some(from), Some(to)) => self.eval(vehicle, from, to),
            _ => Eval::default(),
        }
    }

    /// Returns the user visible cost of a whole route from its travel totals.
    pub fn user_route_cost(&self, vehicle: usize, duration: Duration, distance: Distance) -> Cost {
        let costs = &self.vehicles[vehicle].costs;
        costs.fixed + synthesized_cost(costs.per_hour, costs.per_km, duration, distance)
    }

    /// Checks whether the vehicle's profile carries a custom costs matrix.
    pub fn has_custom_costs(&self, vehicle: usize) -> bool {
        self.matrices[self.vehicles[vehicle].profile].costs.is_some()
    }

    /// Resolves a forced step reference to a job index.
    pub fn resolve_step(&self, step: &StepRef) -> Option<usize> {
        match step {
            StepRef::Job(id) => self.single_index.get(id).copied(),
            StepRef::Pickup(id) => self.pickup_index.get(id).copied(),
            StepRef::Delivery(id) => self.delivery_index.get(id).copied(),
            _ => None,
        }
    }

    /// Returns job indices pinned to the vehicle by forced steps, in forced order.
    pub fn forced_jobs(&self, vehicle: usize) -> Vec<usize> {
        self.vehicles[vehicle]
            .steps
            .iter()
            .filter_map(|step| self.resolve_step(&step.kind))
            .collect()
    }
}

/// Synthesizes a user cost from travel totals, rounding half away from zero.
fn synthesized_cost(per_hour: Cost, per_km: Cost, duration: Duration, distance: Distance) -> Cost {
    round_half_away(per_hour as f64 * duration as f64 / 3600. + per_km as f64 * distance as f64 / 1000.)
}

/// Assembles and validates an [`Input`]. All referential and unit consistency checks happen in
/// [`InputBuilder::build`], so the solver itself never revalidates.
pub struct InputBuilder {
    amount_size: usize,
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    profiles: Vec<String>,
    matrices: Vec<ProfileMatrices>,
}

impl InputBuilder {
    /// Creates a new instance of `InputBuilder` for problems with the given amount length.
    pub fn new(amount_size: usize) -> Self {
        Self { amount_size, jobs: vec![], vehicles: vec![], profiles: vec![], matrices: vec![] }
    }

    /// Interns a profile name and returns its index.
    pub fn profile(&mut self, name: &str) -> usize {
        if let Some(index) = self.profiles.iter().position(|p| p == name) {
            index
        } else {
            self.profiles.push(name.to_string());
            self.matrices.push(ProfileMatrices::default());
            self.profiles.len() - 1
        }
    }

    /// Sets the durations matrix of a profile.
    pub fn durations(&mut self, profile: usize, matrix: Matrix<Duration>) -> &mut Self {
        self.matrices[profile].durations = Some(matrix);
        self
    }

    /// Sets the distances matrix of a profile.
    pub fn distances(&mut self, profile: usize, matrix: Matrix<Distance>) -> &mut Self {
        self.matrices[profile].distances = Some(matrix);
        self
    }

    /// Sets the custom costs matrix of a profile.
    pub fn costs(&mut self, profile: usize, matrix: Matrix<Cost>) -> &mut Self {
        self.matrices[profile].costs = Some(matrix);
        self
    }

    /// Adds a single job.
    pub fn add_job(&mut self, mut job: Job) -> &mut Self {
        job.kind = JobKind::Single;
        job.partner = None;
        self.jobs.push(job);
        self
    }

    /// Adds a shipment as its paired pickup and delivery halves.
    pub fn add_shipment(&mut self, mut pickup: Job, mut delivery: Job) -> &mut Self {
        let pickup_index = self.jobs.len();
        pickup.kind = JobKind::Pickup;
        pickup.partner = Some(pickup_index + 1);
        delivery.kind = JobKind::Delivery;
        delivery.partner = Some(pickup_index);
        self.jobs.push(pickup);
        self.jobs.push(delivery);
        self
    }

    /// Adds a vehicle.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Validates the assembled problem and returns the immutable input.
    pub fn build(self) -> Result<Input, Error> {
        let Self { amount_size, jobs, vehicles, profiles, matrices } = self;

        let mut single_index = HashMap::new();
        let mut pickup_index = HashMap::new();
        let mut delivery_index = HashMap::new();

        for (index, job) in jobs.iter().enumerate() {
            check_job(job, amount_size)?;
            let slot = match job.kind {
                JobKind::Single => &mut single_index,
                JobKind::Pickup => &mut pickup_index,
                JobKind::Delivery => &mut delivery_index,
            };
            if slot.insert(job.id, index).is_some() {
                return Err(Error::Input(format!("duplicate id {} within job type", job.id)));
            }
        }

        check_shipments(&jobs, amount_size)?;

        for vehicle in vehicles.iter() {
            check_vehicle(vehicle, amount_size, profiles.len())?;
            check_vehicle_steps(vehicle, &jobs, &single_index, &pickup_index, &delivery_index)?;
        }

        check_matrices(&jobs, &vehicles, &profiles, &matrices)?;

        let report_distances = matrices.iter().any(|m| m.distances.is_some());

        Ok(Input {
            jobs,
            vehicles,
            profiles,
            amount_size,
            report_distances,
            matrices,
            single_index,
            pickup_index,
            delivery_index,
        })
    }
}

fn check_time_windows(windows: &[crate::models::common::TimeWindow], owner: &str) -> Result<(), Error> {
    if windows.is_empty() {
        return Err(Error::Input(format!("empty time_windows for {owner}")));
    }
    for tw in windows {
        if tw.start >= tw.end || tw.start < 0 {
            return Err(Error::Input(format!("invalid time window [{}, {}) for {owner}", tw.start, tw.end)));
        }
    }
    for pair in windows.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(Error::Input(format!("overlapping time windows for {owner}")));
        }
    }

    Ok(())
}

fn check_job(job: &Job, amount_size: usize) -> Result<(), Error> {
    if job.delivery.size() != amount_size || job.pickup.size() != amount_size {
        return Err(Error::Input(format!("inconsistent amount length for job {}", job.id)));
    }
    if job.priority > MAX_PRIORITY {
        return Err(Error::Input(format!("invalid priority value for job {}", job.id)));
    }
    if job.setup < 0 || job.service < 0 {
        return Err(Error::Input(format!("negative duration for job {}", job.id)));
    }
    check_time_windows(&job.time_windows, &format!("job {}", job.id))
}

fn check_shipments(jobs: &[Job], _amount_size: usize) -> Result<(), Error> {
    for (index, job) in jobs.iter().enumerate() {
        match job.kind {
            JobKind::Single => {
                if job.partner.is_some() {
                    return Err(Error::Input(format!("single job {} with a partner", job.id)));
                }
            }
            JobKind::Pickup | JobKind::Delivery => {
                let partner = job
                    .partner
                    .and_then(|p| jobs.get(p))
                    .ok_or_else(|| Error::Input(format!("unpaired shipment half {}", job.id)))?;
                let (pickup, delivery) =
                    if job.kind == JobKind::Pickup { (job, partner) } else { (partner, job) };
                if pickup.kind != JobKind::Pickup
                    || delivery.kind != JobKind::Delivery
                    || partner.partner != Some(index)
                {
                    return Err(Error::Input(format!("unpaired shipment half {}", job.id)));
                }
                if pickup.pickup != delivery.delivery {
                    return Err(Error::Input(format!(
                        "mismatched shipment amount for pickup {} and delivery {}",
                        pickup.id, delivery.id
                    )));
                }
            }
        }
    }

    Ok(())
}

fn check_vehicle(vehicle: &Vehicle, amount_size: usize, profiles: usize) -> Result<(), Error> {
    if vehicle.capacity.size() != amount_size {
        return Err(Error::Input(format!("inconsistent capacity length for vehicle {}", vehicle.id)));
    }
    if vehicle.start.is_none() && vehicle.end.is_none() {
        return Err(Error::Input(format!("vehicle {} has neither start nor end", vehicle.id)));
    }
    if vehicle.profile >= profiles {
        return Err(Error::Input(format!("unknown profile for vehicle {}", vehicle.id)));
    }
    if !(vehicle.speed_factor.is_finite() && vehicle.speed_factor > 0.) {
        return Err(Error::Input(format!("invalid speed factor for vehicle {}", vehicle.id)));
    }
    check_time_windows(std::slice::from_ref(&vehicle.time_window), &format!("vehicle {}", vehicle.id))?;

    for brk in vehicle.breaks.iter() {
        if brk.service < 0 {
            return Err(Error::Input(format!("negative service for break {}", brk.id)));
        }
        if let Some(max_load) = brk.max_load.as_ref() {
            if max_load.size() != amount_size {
                return Err(Error::Input(format!("inconsistent max_load length for break {}", brk.id)));
            }
        }
        check_time_windows(&brk.time_windows, &format!("break {}", brk.id))?;
    }

    Ok(())
}

fn check_vehicle_steps(
    vehicle: &Vehicle,
    jobs: &[Job],
    single_index: &HashMap<u64, usize>,
    pickup_index: &HashMap<u64, usize>,
    delivery_index: &HashMap<u64, usize>,
) -> Result<(), Error> {
    let mut seen = Vec::new();
    for step in vehicle.steps.iter() {
        let job_index = match step.kind {
            StepRef::Start | StepRef::End => continue,
            StepRef::Break(id) => {
                if !vehicle.breaks.iter().any(|b| b.id == id) {
                    return Err(Error::Input(format!(
                        "unknown break id {id} in steps for vehicle {}",
                        vehicle.id
                    )));
                }
                continue;
            }
            StepRef::Job(id) => single_index.get(&id).copied(),
            StepRef::Pickup(id) => pickup_index.get(&id).copied(),
            StepRef::Delivery(id) => delivery_index.get(&id).copied(),
        };
        let Some(job_index) = job_index else {
            return Err(Error::Input(format!("unknown id in steps for vehicle {}", vehicle.id)));
        };
        if seen.contains(&job_index) {
            return Err(Error::Input(format!("duplicate step for vehicle {}", vehicle.id)));
        }
        // a forced pickup requires its delivery somewhere in the forced sequence too
        if jobs[job_index].kind == JobKind::Pickup {
            let delivery = jobs[job_index].partner.expect("paired at build");
            let listed = vehicle.steps.iter().any(|s| matches!(s.kind, StepRef::Delivery(id) if id == jobs[delivery].id));
            if !listed {
                return Err(Error::Input(format!(
                    "pickup without delivery in steps for vehicle {}",
                    vehicle.id
                )));
            }
        }
        // a forced delivery requires its pickup earlier in the forced sequence
        if jobs[job_index].kind == JobKind::Delivery {
            let pickup = jobs[job_index].partner.expect("paired at build");
            if !seen.contains(&pickup) {
                return Err(Error::Input(format!(
                    "delivery before pickup in steps for vehicle {}",
                    vehicle.id
                )));
            }
        }
        seen.push(job_index);
    }

    Ok(())
}

fn check_matrices(
    jobs: &[Job],
    vehicles: &[Vehicle],
    profiles: &[String],
    matrices: &[ProfileMatrices],
) -> Result<(), Error> {
    let max_location = jobs
        .iter()
        .map(|j| j.location)
        .chain(vehicles.iter().filter_map(|v| v.start))
        .chain(vehicles.iter().filter_map(|v| v.end))
        .max();
    let Some(max_location) = max_location else {
        return Ok(());
    };

    for vehicle in vehicles {
        let profile = &matrices[vehicle.profile];
        let name = &profiles[vehicle.profile];
        if profile.durations.is_none() {
            return Err(Error::Routing(format!("no durations matrix for profile {name}")));
        }
        for (matrix_size, kind) in [
            (profile.durations.as_ref().map(Matrix::size), "durations"),
            (profile.distances.as_ref().map(Matrix::size), "distances"),
            (profile.costs.as_ref().map(Matrix::size), "costs"),
        ] {
            if let Some(size) = matrix_size {
                if max_location >= size {
                    return Err(Error::Input(format!(
                        "location index {max_location} out of range for {kind} matrix of profile {name}"
                    )));
                }
            }
        }
    }

    Ok(())
}
