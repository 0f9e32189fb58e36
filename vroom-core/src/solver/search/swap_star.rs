#[cfg(test)]
#[path = "../../../tests/unit/solver/search/swap_star_test.rs"]
mod swap_star_test;

use super::{replace_delta, try_candidate, Candidate, Move};
use crate::construction::{removal_delta, single_delta, SolutionContext};
use crate::models::common::Eval;
use crate::models::problem::JobKind;
use crate::models::solution::Route;
use crate::models::Input;

/// Positions kept per job and receiving route. Restricting re-insertion to the few best slots
/// is what keeps the quadratic pair scan affordable.
const TOP_POSITIONS: usize = 3;

/// Scans one-for-one job swaps between two routes where each job is re-inserted at its own
/// best position instead of the vacated one.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    if ra.is_empty() || rb.is_empty() || s > t {
        // the swap is symmetric, scanning the ordered pair once is enough
        return;
    }

    let va = &input.vehicles[s];
    let vb = &input.vehicles[t];

    // candidate insertion slots of every target job into the source route and vice versa
    let b_into_a: Vec<_> = rb.steps.iter().map(|&job| top_positions(input, ra, job, va)).collect();
    let a_into_b: Vec<_> = ra.steps.iter().map(|&job| top_positions(input, rb, job, vb)).collect();

    for s_rank in 0..ra.steps.len() {
        let a = ra.steps[s_rank];
        if input.jobs[a].kind != JobKind::Single || ctx.locked.contains(&a) {
            continue;
        }
        let a_removal = removal_delta(input, ra, s_rank);

        for t_rank in 0..rb.steps.len() {
            let b = rb.steps[t_rank];
            if input.jobs[b].kind != JobKind::Single || ctx.locked.contains(&b) {
                continue;
            }
            let (Some(slots_b), Some(slots_a)) = (&b_into_a[t_rank], &a_into_b[s_rank]) else {
                continue;
            };

            let Some((delta_a, s_insert)) = best_slot(input, ra, s_rank, b, a_removal, slots_b) else {
                continue;
            };
            let b_removal = removal_delta(input, rb, t_rank);
            let Some((delta_b, t_insert)) = best_slot(input, rb, t_rank, a, b_removal, slots_a) else {
                continue;
            };

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_: Move::SwapStar { s_route: s, s_rank, t_route: t, t_rank, s_insert, t_insert },
                    gain: -(delta_a + delta_b),
                    priority_gain: 0,
                    assigned_delta: 0,
                    activated_fixed: 0,
                    t_route: t,
                    s_rank,
                },
            );
        }
    }
}

/// The cheapest insertion slots of a job into a route, ignoring the upcoming removal. `None`
/// when the receiver cannot serve the job at all.
fn top_positions(
    input: &Input,
    route: &Route,
    job: usize,
    receiver: &crate::models::problem::Vehicle,
) -> Option<Vec<(usize, Eval)>> {
    let data = &input.jobs[job];
    if data.kind != JobKind::Single || !receiver.can_serve(&data.skills) {
        return None;
    }

    let mut slots: Vec<(usize, Eval)> =
        (0..=route.steps.len()).map(|rank| (rank, single_delta(input, route, data.location, rank))).collect();
    slots.sort_by_key(|&(rank, delta)| (delta.cost, rank));
    slots.truncate(TOP_POSITIONS);

    Some(slots)
}

/// The cheapest way to place the incoming job into the route once the outgoing rank is
/// vacated: either one of the precomputed slots, adjusted for the removal, or straight into
/// the vacated position.
fn best_slot(
    input: &Input,
    route: &Route,
    vacated: usize,
    incoming: usize,
    removal: Eval,
    slots: &[(usize, Eval)],
) -> Option<(Eval, usize)> {
    let location = input.jobs[incoming].location;

    // in place: remove and insert collapse into one replacement
    let in_place = replace_delta(input, route, vacated, location);
    let mut best = (in_place, vacated);

    for &(rank, delta) in slots.iter() {
        if rank == vacated || rank == vacated + 1 {
            continue;
        }
        // the precomputed delta is exact, the removal happens at non adjacent edges
        let combined = removal + delta;
        if combined.cost < best.0.cost {
            let insert = if rank > vacated { rank - 1 } else { rank };
            best = (combined, insert);
        }
    }

    Some(best)
}
