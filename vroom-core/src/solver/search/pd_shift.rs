#[cfg(test)]
#[path = "../../../tests/unit/solver/search/pd_shift_test.rs"]
mod pd_shift_test;

use super::{fixed_delta, pair_removal_delta, try_candidate, Candidate, Move};
use crate::construction::{evaluate_job_insertion, InsertionPosition, SolutionContext};
use crate::models::problem::JobKind;
use crate::models::Input;

/// Scans moves of whole shipments from the source route into the target route, precedence
/// preserved by construction: the pair insertion evaluator only yields pickup first slots.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    if ra.steps.len() < 2 {
        return;
    }

    let releases = -fixed_delta(input, s, ra.steps.len(), ra.steps.len() - 2);
    let activates = fixed_delta(input, t, rb.steps.len(), rb.steps.len() + 2);

    for pickup_rank in 0..ra.steps.len() {
        let pickup = ra.steps[pickup_rank];
        if input.jobs[pickup].kind != JobKind::Pickup {
            continue;
        }
        let delivery = input.jobs[pickup].partner.expect("paired at build");
        if ctx.locked.contains(&pickup) || ctx.locked.contains(&delivery) {
            continue;
        }
        let delivery_rank = ra.rank_of(delivery).expect("pair in one route");

        let removal = pair_removal_delta(input, ra, pickup_rank, delivery_rank);
        let Some(insertion) = evaluate_job_insertion(input, rb, &ctx.states[t], pickup) else {
            continue;
        };
        let InsertionPosition::Pair { pickup_rank: t_pickup, delivery_rank: t_delivery } = insertion.position else {
            continue;
        };

        let mut gain = -(removal + insertion.delta);
        gain.cost += releases - activates;

        try_candidate(
            input,
            ctx,
            best,
            Candidate {
                move_: Move::PdShift {
                    s_route: s,
                    pickup_rank,
                    delivery_rank,
                    t_route: t,
                    t_pickup,
                    t_delivery,
                },
                gain,
                priority_gain: 0,
                assigned_delta: 0,
                activated_fixed: activates,
                t_route: t,
                s_rank: pickup_rank,
            },
        );
    }
}
