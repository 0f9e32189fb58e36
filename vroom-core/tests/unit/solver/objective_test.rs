use super::*;
use crate::construction::SolutionContext;
use crate::helpers::*;

fn indicators_for(steps: Vec<usize>) -> Indicators {
    let mut high = create_test_job(1, 1);
    high.priority = 5;
    let input = create_test_input(
        vec![high, create_test_job(2, 2)],
        vec![],
        vec![create_test_vehicle(1, Some(0), Some(0))],
        create_line_matrix(3),
    );
    let mut ctx = SolutionContext::new(&input);
    for (rank, job) in steps.into_iter().enumerate() {
        ctx.insert(&input, 0, rank, job);
    }

    Indicators::of(&input, &ctx)
}

#[test]
fn can_compute_indicators() {
    let indicators = indicators_for(vec![0, 1]);

    assert_eq!(indicators.priority, 5);
    assert_eq!(indicators.assigned, 2);
    assert_eq!(indicators.duration, 40);
    assert_eq!(indicators.cost, 40);
}

#[test]
fn priority_dominates_cost() {
    let expensive_with_priority = indicators_for(vec![0, 1]);
    let cheap_without = indicators_for(vec![1]);

    assert!(expensive_with_priority.better_than(&cheap_without));
}

#[test]
fn assigned_count_dominates_cost() {
    let both = indicators_for(vec![1, 0]);
    let one = indicators_for(vec![0]);

    assert!(both.better_than(&one));
    assert!(!one.better_than(&both));
}

#[test]
fn cheaper_wins_at_equal_assignment() {
    let ordered = indicators_for(vec![0, 1]);
    let detour = indicators_for(vec![1, 0]);

    assert!(ordered.key() <= detour.key());
}
