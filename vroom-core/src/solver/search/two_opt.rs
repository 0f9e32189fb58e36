#[cfg(test)]
#[path = "../../../tests/unit/solver/search/two_opt_test.rs"]
mod two_opt_test;

use super::{charged, try_candidate, vehicles_equivalent, Candidate, Move};
use crate::construction::{location_before, location_from, SolutionContext};
use crate::models::common::Eval;
use crate::models::problem::JobKind;
use crate::models::solution::Route;
use crate::models::Input;

/// Scans suffix exchanges between two routes, plain and with reversed arrival, sharing the
/// per suffix precomputations so that each cut pair evaluates O(1).
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    let (na, nb) = (ra.steps.len(), rb.steps.len());
    if na == 0 && nb == 0 {
        return;
    }

    let sa = &ctx.states[s];
    let sb = &ctx.states[t];
    let va = &input.vehicles[s];
    let vb = &input.vehicles[t];

    // per suffix data: internal travel under the receiving vehicle, both orientations
    let (b_under_a, b_under_a_rev) = suffix_internals(input, s, rb, ctx, t);
    let (a_under_b, a_under_b_rev) = suffix_internals(input, t, ra, ctx, s);

    let a_movable = suffix_movable(input, ctx, s, vb);
    let b_movable = suffix_movable(input, ctx, t, va);
    let a_pair_free = suffix_pair_free(input, ra);
    let b_pair_free = suffix_pair_free(input, rb);

    for s_cut in 0..=na {
        if !a_movable[s_cut] || sa.open_pairs[s_cut] != 0 {
            continue;
        }
        let a_anchor = if s_cut == 0 { va.start } else { Some(input.jobs[ra.steps[s_cut - 1]].location) };
        let prefix_a = if s_cut == 0 { Eval::default() } else { sa.fwd[s_cut - 1] };

        for t_cut in 0..=nb {
            if (s_cut == na && t_cut == nb) || (s_cut == 0 && t_cut == 0) {
                continue;
            }
            if !b_movable[t_cut] || sb.open_pairs[t_cut] != 0 {
                continue;
            }

            let new_len_a = s_cut + nb - t_cut;
            let new_len_b = t_cut + na - s_cut;
            if va.max_tasks.is_some_and(|max| new_len_a > max) || vb.max_tasks.is_some_and(|max| new_len_b > max) {
                continue;
            }

            let b_anchor = if t_cut == 0 { vb.start } else { Some(input.jobs[rb.steps[t_cut - 1]].location) };
            let prefix_b = if t_cut == 0 { Eval::default() } else { sb.fwd[t_cut - 1] };

            let old = sa.eval_total + sb.eval_total;
            let fixed_old = charged(input, s, na) + charged(input, t, nb);
            let fixed_new = charged(input, s, new_len_a) + charged(input, t, new_len_b);

            // plain suffix exchange
            {
                let new_a = glue(input, s, prefix_a, a_anchor, rb, t_cut, false, &b_under_a, new_len_a);
                let new_b = glue(input, t, prefix_b, b_anchor, ra, s_cut, false, &a_under_b, new_len_b);
                let mut gain = old - new_a - new_b;
                gain.cost += fixed_old - fixed_new;

                try_candidate(
                    input,
                    ctx,
                    best,
                    Candidate {
                        move_: Move::TwoOpt { s_route: s, s_cut, t_route: t, t_cut },
                        gain,
                        priority_gain: 0,
                        assigned_delta: 0,
                        activated_fixed: (fixed_new - fixed_old).max(0),
                        t_route: t,
                        s_rank: s_cut,
                    },
                );
            }

            // reversed arrival needs both suffixes free of shipments
            if a_pair_free[s_cut] && b_pair_free[t_cut] {
                let new_a = glue(input, s, prefix_a, a_anchor, rb, t_cut, true, &b_under_a_rev, new_len_a);
                let new_b = glue(input, t, prefix_b, b_anchor, ra, s_cut, true, &a_under_b_rev, new_len_b);
                let mut gain = old - new_a - new_b;
                gain.cost += fixed_old - fixed_new;

                try_candidate(
                    input,
                    ctx,
                    best,
                    Candidate {
                        move_: Move::ReverseTwoOpt { s_route: s, s_cut, t_route: t, t_cut },
                        gain,
                        priority_gain: 0,
                        assigned_delta: 0,
                        activated_fixed: (fixed_new - fixed_old).max(0),
                        t_route: t,
                        s_rank: s_cut,
                    },
                );
            }
        }
    }
}

/// Scans sub sequence reversals inside one route.
pub(crate) fn scan_intra(input: &Input, ctx: &SolutionContext, route: usize, best: &mut Option<Candidate>) {
    let r = &ctx.solution.routes[route];
    let state = &ctx.states[route];
    let n = r.steps.len();
    if n < 2 {
        return;
    }

    let rank_of: hashbrown::HashMap<usize, usize> =
        r.steps.iter().enumerate().map(|(rank, &step)| (step, rank)).collect();

    for s_rank in 0..n - 1 {
        if ctx.locked.contains(&r.steps[s_rank]) {
            continue;
        }
        let loc_i = input.jobs[r.steps[s_rank]].location;
        let prev = location_before(input, r, s_rank);

        for t_rank in s_rank + 1..n {
            if ctx.locked.contains(&r.steps[t_rank]) {
                break;
            }
            // a shipment fully inside the range would flip, and stays inside for any larger range
            let step = r.steps[t_rank];
            if input.jobs[step].kind == JobKind::Delivery {
                let pickup = input.jobs[step].partner.expect("paired at build");
                if rank_of.get(&pickup).is_some_and(|&rank| rank >= s_rank) {
                    break;
                }
            }

            let loc_j = input.jobs[r.steps[t_rank]].location;
            let next = location_from(input, r, t_rank + 1);

            let old = input.leg(route, prev, Some(loc_i)) + state.segment(s_rank, t_rank)
                + input.leg(route, Some(loc_j), next);
            let new = input.leg(route, prev, Some(loc_j))
                + state.segment_reversed(s_rank, t_rank)
                + input.leg(route, Some(loc_i), next);

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_: Move::IntraTwoOpt { route, s_rank, t_rank },
                    gain: old - new,
                    priority_gain: 0,
                    assigned_delta: 0,
                    activated_fixed: 0,
                    t_route: route,
                    s_rank,
                },
            );
        }
    }
}

/// Builds the travel evaluation of a prefix glued to another route's suffix.
#[allow(clippy::too_many_arguments)]
fn glue(
    input: &Input,
    vehicle: usize,
    prefix: Eval,
    anchor: Option<crate::models::common::Location>,
    donor: &Route,
    cut: usize,
    reversed: bool,
    internals: &[Eval],
    new_len: usize,
) -> Eval {
    if new_len == 0 {
        return Eval::default();
    }

    let v = &input.vehicles[vehicle];
    let n = donor.steps.len();

    if cut == n {
        // nothing arrives, the prefix closes on its own
        return prefix + input.leg(vehicle, anchor, v.end);
    }

    let (head, tail) = if reversed {
        (input.jobs[donor.steps[n - 1]].location, input.jobs[donor.steps[cut]].location)
    } else {
        (input.jobs[donor.steps[cut]].location, input.jobs[donor.steps[n - 1]].location)
    };

    prefix
        + input.leg(vehicle, anchor, Some(head))
        + internals[cut]
        + input.leg(vehicle, Some(tail), v.end)
}

/// Internal travel of every suffix of the route under the receiving vehicle, forward and
/// reversed. Falls back to the cached cumulative sums when both vehicles evaluate identically.
fn suffix_internals(
    input: &Input,
    receiver: usize,
    donor: &Route,
    ctx: &SolutionContext,
    donor_index: usize,
) -> (Vec<Eval>, Vec<Eval>) {
    let n = donor.steps.len();
    let state = &ctx.states[donor_index];

    if vehicles_equivalent(input, receiver, donor_index) {
        let fwd = (0..=n)
            .map(|k| if k + 1 < n { state.fwd[n - 1] - state.fwd[k] } else { Eval::default() })
            .collect();
        let rev = (0..=n).map(|k| if k < n { state.bwd[k] } else { Eval::default() }).collect();
        return (fwd, rev);
    }

    let mut fwd = vec![Eval::default(); n + 1];
    let mut rev = vec![Eval::default(); n + 1];
    for k in (0..n.saturating_sub(1)).rev() {
        let here = input.jobs[donor.steps[k]].location;
        let after = input.jobs[donor.steps[k + 1]].location;
        fwd[k] = fwd[k + 1] + input.eval(receiver, here, after);
        rev[k] = rev[k + 1] + input.eval(receiver, after, here);
    }

    (fwd, rev)
}

/// Whether each suffix may move to the other vehicle: no pinned job inside and every job
/// servable by the receiver.
fn suffix_movable(input: &Input, ctx: &SolutionContext, route: usize, receiver: &crate::models::problem::Vehicle) -> Vec<bool> {
    let steps = &ctx.solution.routes[route].steps;
    let n = steps.len();

    let mut movable = vec![true; n + 1];
    for k in (0..n).rev() {
        let job = &input.jobs[steps[k]];
        movable[k] = movable[k + 1] && !ctx.locked.contains(&steps[k]) && receiver.can_serve(&job.skills);
    }

    movable
}

/// Whether each suffix carries no shipment half at all.
fn suffix_pair_free(input: &Input, route: &Route) -> Vec<bool> {
    let n = route.steps.len();

    let mut free = vec![true; n + 1];
    for k in (0..n).rev() {
        free[k] = free[k + 1] && input.jobs[route.steps[k]].kind == JobKind::Single;
    }

    free
}
