#[cfg(test)]
#[path = "../../tests/unit/solver/objective_test.rs"]
mod objective_test;

use crate::construction::SolutionContext;
use crate::models::common::{Cost, Duration};
use crate::models::Input;

/// The lexicographic objective of a solution: assigned priority first, then assigned task
/// count, then internal cost, then travel duration. Lower keys are better.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Indicators {
    /// Sum of assigned task priorities.
    pub priority: u64,
    /// Amount of assigned tasks.
    pub assigned: usize,
    /// Sum of internal route costs, vehicle fixed costs included.
    pub cost: Cost,
    /// Sum of route travel durations.
    pub duration: Duration,
}

impl Indicators {
    /// Computes the indicators of a solution from its cached route states.
    pub fn of(input: &Input, ctx: &SolutionContext) -> Self {
        let priority = ctx
            .solution
            .routes
            .iter()
            .flat_map(|route| route.steps.iter())
            .map(|&step| input.jobs[step].priority as u64)
            .sum();
        let cost = ctx
            .solution
            .routes
            .iter()
            .zip(ctx.states.iter())
            .map(|(route, state)| state.internal_cost(input, route))
            .sum();
        let duration = ctx.states.iter().map(|state| state.eval_total.duration).sum();

        Self { priority, assigned: ctx.solution.assigned(), cost, duration }
    }

    /// Returns a totally ordered key where smaller is better.
    pub fn key(&self) -> (i64, i64, Cost, Duration) {
        (-(self.priority as i64), -(self.assigned as i64), self.cost, self.duration)
    }

    /// Checks whether this solution is strictly better than the other one.
    pub fn better_than(&self, other: &Self) -> bool {
        self.key() < other.key()
    }
}

impl PartialOrd for Indicators {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Indicators {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}
