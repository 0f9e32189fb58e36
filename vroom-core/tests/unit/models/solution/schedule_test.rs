use super::*;
use crate::helpers::*;
use crate::models::common::TimeWindow;
use crate::models::problem::Break;

#[test]
fn can_schedule_plain_route() {
    let mut job = create_test_job(1, 1);
    job.service = 5;
    job.setup = 2;
    let input = create_test_input(
        vec![job, create_test_job(2, 2)],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );

    let schedule = simulate(&input, 0, &[0, 1]).expect("schedulable");

    assert_eq!(schedule.arrival, vec![10, 27]);
    assert_eq!(schedule.service_start, vec![12, 27]);
    assert_eq!(schedule.waiting, vec![0, 0]);
    assert_eq!(schedule.setup, vec![2, 0]);
    assert_eq!(schedule.travel_duration, 40);
    assert_eq!(schedule.end_time, 47);
}

#[test]
fn can_wait_for_time_window() {
    let input = create_test_input(
        vec![create_job_with_tws(1, 1, vec![(100, 200)])],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );

    let schedule = simulate(&input, 0, &[0]).expect("schedulable");

    assert_eq!(schedule.arrival, vec![10]);
    assert_eq!(schedule.service_start, vec![100]);
    assert_eq!(schedule.waiting, vec![90]);
}

#[test]
fn cannot_schedule_after_window_closes() {
    let input = create_test_input(
        vec![create_job_with_tws(1, 2, vec![(0, 10)])],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );

    assert!(simulate(&input, 0, &[0]).is_none());
}

#[test]
fn can_skip_setup_at_same_location() {
    let mut first = create_test_job(1, 1);
    first.setup = 3;
    let mut second = create_test_job(2, 1);
    second.setup = 3;
    let input = create_test_input(
        vec![first, second],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );

    let schedule = simulate(&input, 0, &[0, 1]).expect("schedulable");

    assert_eq!(schedule.setup, vec![3, 0]);
}

#[test]
fn can_respect_shift_end() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.time_window = TimeWindow::new(0, 15);
    let input =
        create_test_input(vec![create_test_job(1, 1)], vec![], vec![vehicle], create_line_matrix(3));

    // ten out, ten back: cannot close the shift in time
    assert!(simulate(&input, 0, &[0]).is_none());
}

#[test]
fn can_take_break_before_it_expires() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.breaks = vec![create_test_break(1, 0, 5, 7)];
    let input =
        create_test_input(vec![create_test_job(1, 1)], vec![], vec![vehicle], create_line_matrix(3));

    let schedule = simulate(&input, 0, &[0]).expect("schedulable");

    // the break cannot start after serving the job, so it is taken up front
    assert_eq!(schedule.break_leg, vec![0]);
    assert_eq!(schedule.break_start, vec![0]);
    assert_eq!(schedule.arrival, vec![17]);
}

#[test]
fn can_defer_break_past_next_job() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.breaks = vec![create_test_break(1, 0, 1000, 7)];
    let input =
        create_test_input(vec![create_test_job(1, 1)], vec![], vec![vehicle], create_line_matrix(3));

    let schedule = simulate(&input, 0, &[0]).expect("schedulable");

    // plenty of slack left, the break settles after the last job
    assert_eq!(schedule.break_leg, vec![1]);
    assert_eq!(schedule.arrival, vec![10]);
    assert_eq!(schedule.end_time, 27);
}

#[test]
fn cannot_schedule_break_over_max_load() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.breaks = vec![Break {
        max_load: Some(crate::models::common::Amount::from(vec![0])),
        ..create_test_break(1, 0, 5, 7)
    }];
    let input = create_test_input(
        vec![create_delivery_job(1, 1, vec![3])],
        vec![],
        vec![vehicle],
        create_line_matrix(3),
    );

    // the forced early break happens while the delivery load is still on board
    assert!(simulate(&input, 0, &[0]).is_none());
}

#[test]
fn unused_vehicle_takes_no_breaks() {
    let mut vehicle = create_test_vehicle(1, Some(0), Some(0));
    vehicle.breaks = vec![create_test_break(1, 0, 5, 7)];
    let input = create_test_input(vec![], vec![], vec![vehicle], create_line_matrix(3));

    let schedule = simulate(&input, 0, &[]).expect("schedulable");

    assert!(schedule.break_leg.is_empty());
}
