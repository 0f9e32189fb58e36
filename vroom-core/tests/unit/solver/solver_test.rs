use super::*;
use crate::helpers::*;
use crate::models::common::TimeWindow;
use crate::models::solution::SolutionSummary;
use crate::models::problem::Matrix;
use crate::models::InputBuilder;

fn solve_default(input: &Arc<Input>) -> Solution {
    solve(input, &SolverConfig::default(), &Environment::default()).expect("solvable")
}

fn two_jobs_input(capacity: i64) -> Input {
    let mut builder = InputBuilder::new(1);
    let profile = builder.profile("car");
    let durations = vec![vec![0, 10, 20], vec![10, 0, 15], vec![20, 15, 0]];
    builder.durations(profile, Matrix::from_data(3, durations.into_iter().flatten().collect()).unwrap());
    builder.add_job(create_delivery_job(1, 1, vec![3]));
    builder.add_job(create_delivery_job(2, 2, vec![4]));
    let mut vehicle = create_test_vehicle(1, Some(0), None);
    vehicle.capacity = crate::models::common::Amount::from(vec![capacity]);
    vehicle.time_window = TimeWindow::new(0, 36000);
    builder.add_vehicle(vehicle);

    builder.build().expect("valid input")
}

#[test]
fn can_serve_two_jobs_with_one_vehicle() {
    let input = Arc::new(two_jobs_input(10));

    let solution = solve_default(&input);

    assert!(solution.unassigned.is_empty());
    assert_eq!(solution.routes[0].steps, vec![0, 1]);
    let summary = SolutionSummary::new(&input, &solution);
    assert_eq!(summary.duration, 25);
}

#[test]
fn capacity_shortage_leaves_one_job_unassigned() {
    let input = Arc::new(two_jobs_input(5));

    let solution = solve_default(&input);

    assert_eq!(solution.assigned(), 1);
    assert_eq!(solution.unassigned.len(), 1);
}

#[test]
fn pickup_precedes_delivery() {
    let input = create_test_input(
        vec![],
        vec![create_shipment(1, 1, 2, 2, vec![2])],
        vec![{
            let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
            vehicle.capacity = crate::models::common::Amount::from(vec![2]);
            vehicle
        }],
        create_line_matrix(3),
    );
    let input = Arc::new(input);

    let solution = solve_default(&input);

    assert!(solution.unassigned.is_empty());
    let route = &solution.routes[0];
    let pickup = route.rank_of(0).expect("pickup assigned");
    let delivery = route.rank_of(1).expect("delivery assigned");
    assert!(pickup < delivery);
}

#[test]
fn skills_route_job_to_capable_vehicle() {
    let mut job = create_test_job(1, 1);
    job.skills = [7].into_iter().collect();
    let capable = {
        let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
        vehicle.skills = [7].into_iter().collect();
        vehicle
    };
    let incapable = create_test_vehicle(2, Some(0), Some(0));
    let input = Arc::new(create_test_input(vec![job], vec![], vec![capable, incapable], create_line_matrix(3)));

    let solution = solve_default(&input);

    assert_eq!(solution.routes[0].steps, vec![0]);
    assert!(solution.routes[1].is_empty());
    assert!(solution.unassigned.is_empty());
}

#[test]
fn time_windows_force_service_order() {
    let input = Arc::new(create_test_input(
        vec![
            create_job_with_tws(1, 1, vec![(200, 300)]),
            create_job_with_tws(2, 1, vec![(0, 100)]),
        ],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    ));

    let solution = solve_default(&input);

    assert!(solution.unassigned.is_empty());
    // the early window goes first even though its job has the higher id
    assert_eq!(solution.routes[0].steps, vec![1, 0]);

    let summary = SolutionSummary::new(&input, &solution);
    let waits: Vec<_> = summary.routes[0]
        .steps
        .iter()
        .filter(|step| step.id.is_some())
        .map(|step| step.waiting_time)
        .collect();
    assert_eq!(waits, vec![0, 190]);
}

#[test]
fn priority_trumps_cost() {
    let mut far_but_important = create_delivery_job(1, 2, vec![6]);
    far_but_important.priority = 10;
    let near = create_delivery_job(2, 1, vec![6]);
    let input = Arc::new(create_test_input(
        vec![far_but_important, near],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    ));

    let solution = solve_default(&input);

    assert_eq!(solution.routes[0].steps, vec![0]);
    assert_eq!(solution.unassigned.iter().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn identical_runs_produce_identical_solutions() {
    let input = Arc::new(two_jobs_input(5));
    let config = SolverConfig { thread_count: 2, ..SolverConfig::default() };

    let first = solve(&input, &config, &Environment::default()).expect("solvable");
    let second = solve(&input, &config, &Environment::default()).expect("solvable");

    assert_eq!(first, second);
}

#[test]
fn empty_plan_solves_to_empty_solution() {
    let input = Arc::new(create_test_input(
        vec![],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    ));

    let solution = solve_default(&input);

    assert!(solution.unassigned.is_empty());
    assert!(solution.routes.iter().all(|route| route.is_empty()));
}
