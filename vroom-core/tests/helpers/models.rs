//! Model factories shared by unit tests. Problems default to one dimensional amounts, the
//! `car` profile and a capacity of ten.

use crate::models::common::{Amount, TimeWindow};
use crate::models::problem::{Break, Job, JobKind, Matrix, Vehicle, VehicleCosts};
use crate::models::{Input, InputBuilder};

/// Default test capacity.
pub const TEST_CAPACITY: i64 = 10;

/// Creates a job with no demand and no constraints at the given location.
pub fn create_test_job(id: u64, location: usize) -> Job {
    Job {
        id,
        kind: JobKind::Single,
        location,
        setup: 0,
        service: 0,
        delivery: Amount::new(1),
        pickup: Amount::new(1),
        skills: Default::default(),
        priority: 0,
        time_windows: vec![TimeWindow::max()],
        description: String::default(),
        partner: None,
    }
}

/// Creates a job delivering the given amount.
pub fn create_delivery_job(id: u64, location: usize, delivery: Vec<i64>) -> Job {
    Job { delivery: Amount::from(delivery), ..create_test_job(id, location) }
}

/// Creates a job constrained to the given time windows.
pub fn create_job_with_tws(id: u64, location: usize, tws: Vec<(i64, i64)>) -> Job {
    Job {
        time_windows: tws.into_iter().map(|(start, end)| TimeWindow::new(start, end)).collect(),
        ..create_test_job(id, location)
    }
}

/// Creates a shipment as its pickup and delivery halves.
pub fn create_shipment(pickup_id: u64, pickup_location: usize, delivery_id: u64, delivery_location: usize, amount: Vec<i64>) -> (Job, Job) {
    let amount = Amount::from(amount);
    let pickup = Job {
        kind: JobKind::Pickup,
        pickup: amount.clone(),
        ..create_test_job(pickup_id, pickup_location)
    };
    let delivery = Job {
        kind: JobKind::Delivery,
        delivery: amount,
        ..create_test_job(delivery_id, delivery_location)
    };

    (pickup, delivery)
}

/// Creates a vehicle with default capacity, universal shift and duration based costs.
pub fn create_test_vehicle(id: u64, start: Option<usize>, end: Option<usize>) -> Vehicle {
    Vehicle {
        id,
        start,
        end,
        profile: 0,
        capacity: Amount::from(vec![TEST_CAPACITY]),
        skills: Default::default(),
        time_window: TimeWindow::max(),
        breaks: vec![],
        costs: VehicleCosts::default(),
        speed_factor: 1.,
        max_tasks: None,
        max_travel_time: None,
        max_distance: None,
        steps: vec![],
        description: String::default(),
    }
}

/// Creates a break with one time window.
pub fn create_test_break(id: u64, start: i64, end: i64, service: i64) -> Break {
    Break {
        id,
        time_windows: vec![TimeWindow::new(start, end)],
        service,
        max_load: None,
        description: String::default(),
    }
}

/// Builds a validated input from jobs, shipments, vehicles and a durations matrix.
pub fn create_test_input(
    jobs: Vec<Job>,
    shipments: Vec<(Job, Job)>,
    vehicles: Vec<Vehicle>,
    durations: Vec<Vec<i64>>,
) -> Input {
    let mut builder = InputBuilder::new(1);
    let profile = builder.profile("car");

    let size = durations.len();
    let data = durations.into_iter().flatten().collect();
    builder.durations(profile, Matrix::from_data(size, data).expect("square durations"));

    for job in jobs {
        builder.add_job(job);
    }
    for (pickup, delivery) in shipments {
        builder.add_shipment(pickup, delivery);
    }
    for vehicle in vehicles {
        builder.add_vehicle(vehicle);
    }

    builder.build().expect("valid test input")
}

/// Builds a solution context with the given step sequences assigned, one per vehicle.
pub fn create_context(input: &Input, routes: Vec<Vec<usize>>) -> crate::construction::SolutionContext {
    let mut ctx = crate::construction::SolutionContext::new(input);
    for (vehicle, steps) in routes.into_iter().enumerate() {
        steps.iter().for_each(|job| {
            ctx.solution.unassigned.remove(job);
        });
        ctx.solution.routes[vehicle].steps = steps;
        ctx.rebuild(input, vehicle);
    }

    ctx
}

/// A four location line: travel costs grow with index distance.
pub fn create_line_matrix(size: usize) -> Vec<Vec<i64>> {
    (0..size)
        .map(|from| (0..size).map(|to| (from as i64 - to as i64).abs() * 10).collect())
        .collect()
}
