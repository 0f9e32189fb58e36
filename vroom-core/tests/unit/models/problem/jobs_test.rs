use super::*;
use crate::helpers::*;
use crate::models::common::TimeWindow;

fn job_with_windows() -> Job {
    Job { time_windows: vec![TimeWindow::new(10, 20), TimeWindow::new(50, 60)], ..create_test_job(1, 0) }
}

parameterized_test! {can_find_earliest_start, (ready, expected), {
    can_find_earliest_start_impl(ready, expected);
}}

can_find_earliest_start! {
    case_01: (0, Some(10)),
    case_02: (15, Some(15)),
    case_03: (20, Some(50)),
    case_04: (59, Some(59)),
    case_05: (60, None),
}

fn can_find_earliest_start_impl(ready: Duration, expected: Option<Duration>) {
    assert_eq!(job_with_windows().earliest_start(ready), expected);
}

parameterized_test! {can_find_latest_start, (bound, expected), {
    can_find_latest_start_impl(bound, expected);
}}

can_find_latest_start! {
    case_01: (100, Some(59)),
    case_02: (55, Some(55)),
    case_03: (30, Some(19)),
    case_04: (5, None),
}

fn can_find_latest_start_impl(bound: Duration, expected: Option<Duration>) {
    assert_eq!(job_with_windows().latest_start(bound), expected);
}

#[test]
fn can_detect_time_constrained_jobs() {
    assert!(!create_test_job(1, 0).is_time_constrained());
    assert!(job_with_windows().is_time_constrained());
}

#[test]
fn can_compute_load_change() {
    let job = Job {
        pickup: Amount::from(vec![3]),
        delivery: Amount::from(vec![1]),
        ..create_test_job(1, 0)
    };

    assert_eq!(job.load_change(), Amount::from(vec![2]));
}
