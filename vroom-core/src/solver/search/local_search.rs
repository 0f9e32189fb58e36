#[cfg(test)]
#[path = "../../../tests/unit/solver/search/local_search_test.rs"]
mod local_search_test;

use super::{assert_consistent, scan_pair, Candidate, Move};
use crate::construction::SolutionContext;
use crate::models::Input;
use crate::utils::Environment;

/// Runs best improvement local search to a fixpoint: scan all route pairs, apply the best
/// strictly improving move under the deterministic tie break order, rescan only the pairs
/// touching a modified route, repeat. Each applied move strictly decreases the lexicographic
/// objective, so termination needs no extra argument.
pub(crate) fn improve(
    input: &Input,
    ctx: &mut SolutionContext,
    exploration_budget: Option<usize>,
    environment: &Environment,
) {
    let fleet = ctx.solution.routes.len();
    if fleet == 0 {
        return;
    }

    let mut best: Vec<Option<Candidate>> = vec![None; fleet * fleet];
    let mut dirty = vec![true; fleet];
    let mut applied = 0_usize;

    loop {
        if environment.is_stopped() || exploration_budget.is_some_and(|budget| applied >= budget) {
            break;
        }

        for s in 0..fleet {
            for t in 0..fleet {
                if dirty[s] || dirty[t] {
                    best[s * fleet + t] = scan_pair(input, ctx, s, t);
                }
            }
        }
        dirty.iter_mut().for_each(|d| *d = false);

        let Some(candidate) = best.iter().flatten().min_by_key(|c| c.key()).copied() else {
            break;
        };

        let touched = candidate.move_.apply(input, ctx);
        assert_consistent(input, ctx);
        applied += 1;

        for &route in touched.iter() {
            dirty[route] = true;
            for other in 0..fleet {
                best[route * fleet + other] = None;
                best[other * fleet + route] = None;
            }
        }

        // assignment swaps invalidate every cached candidate referencing the unassigned set
        if matches!(candidate.move_, Move::PriorityReplace { .. } | Move::UnassignedExchange { .. }) {
            dirty.iter_mut().for_each(|d| *d = true);
        }
    }
}
