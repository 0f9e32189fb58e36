#[cfg(test)]
#[path = "../../../tests/unit/solver/search/ruin_recreate_test.rs"]
mod ruin_recreate_test;

use super::pair_removal_delta;
use crate::construction::{recreate, removal_delta, SolutionContext};
use crate::models::problem::JobKind;
use crate::models::Input;
use crate::utils::{DefaultRandom, Random};

/// Share of assigned tasks removed by one perturbation.
const RUIN_SHARE: usize = 5;
/// Upper bound on removed tasks per perturbation.
const RUIN_CAP: usize = 30;

/// Ruins the solution by removing the tasks whose removal saves the most travel, with a noisy
/// ranking so consecutive perturbations diverge, then re-inserts everything removable by the
/// regret heuristic.
pub(crate) fn perturb(
    input: &Input,
    ctx: &mut SolutionContext,
    random: &DefaultRandom,
    lambda: f64,
    regret_rank: usize,
) {
    let assigned = ctx.solution.assigned();
    if assigned == 0 {
        return;
    }
    let count = (assigned / RUIN_SHARE).clamp(1, RUIN_CAP);

    // removal gains, pairs ranked once via their pickup
    let mut removable: Vec<(f64, u64, usize, usize)> = Vec::new();
    for (vehicle, route) in ctx.solution.routes.iter().enumerate() {
        for (rank, &step) in route.steps.iter().enumerate() {
            let job = &input.jobs[step];
            if ctx.locked.contains(&step) || job.kind == JobKind::Delivery {
                continue;
            }
            if job.partner.is_some_and(|partner| ctx.locked.contains(&partner)) {
                continue;
            }

            let saving = match job.partner {
                None => -removal_delta(input, route, rank).cost,
                Some(partner) => {
                    let delivery_rank = route.rank_of(partner).expect("pair in one route");
                    -pair_removal_delta(input, route, rank, delivery_rank).cost
                }
            };
            let noisy = saving as f64 * random.uniform_real(0.8, 1.2);
            removable.push((noisy, job.id, vehicle, step));
        }
    }

    removable.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

    for &(_, _, vehicle, job) in removable.iter().take(count) {
        ctx.remove(input, vehicle, job);
    }

    recreate(input, ctx, lambda, regret_rank);
}
