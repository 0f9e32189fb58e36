#[cfg(test)]
#[path = "../../../tests/unit/solver/search/or_opt_test.rs"]
mod or_opt_test;

use super::{
    fixed_delta, segment_eval_via, segment_locked, segment_pair_free, segment_pairs_whole, try_candidate, Candidate,
    Move,
};
use crate::construction::{location_before, location_from, SolutionContext};
use crate::models::common::Eval;
use crate::models::Input;

const SEGMENT_LENGTHS: [usize; 2] = [2, 3];

/// Scans moves of two and three job segments from the source route into the target route, in
/// both orientations.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    let sa = &ctx.states[s];
    let vb = &input.vehicles[t];

    for len in SEGMENT_LENGTHS {
        if ra.steps.len() < len || vb.max_tasks.is_some_and(|max| rb.steps.len() + len > max) {
            continue;
        }

        let releases = -fixed_delta(input, s, ra.steps.len(), ra.steps.len() - len);
        let activates = fixed_delta(input, t, rb.steps.len(), rb.steps.len() + 1);

        for s_rank in 0..=ra.steps.len() - len {
            let last = s_rank + len - 1;
            if segment_locked(ctx, s, s_rank, last) {
                continue;
            }
            if !ra.steps[s_rank..=last].iter().all(|&step| vb.can_serve(&input.jobs[step].skills)) {
                continue;
            }
            let whole = segment_pairs_whole(input, ra, s_rank, last);
            let pair_free = segment_pair_free(input, ra, s_rank, last);
            if !whole {
                continue;
            }

            let first_loc = input.jobs[ra.steps[s_rank]].location;
            let last_loc = input.jobs[ra.steps[last]].location;
            let prev = location_before(input, ra, s_rank);
            let next = location_from(input, ra, last + 1);
            let removal = input.leg(s, prev, next)
                - input.leg(s, prev, Some(first_loc))
                - sa.segment(s_rank, last)
                - input.leg(s, Some(last_loc), next);

            for reversed in [false, true] {
                if reversed && !pair_free {
                    continue;
                }
                let internal = segment_eval_via(input, t, ra, sa, s_rank, last, reversed);
                let (head, tail) = if reversed { (last_loc, first_loc) } else { (first_loc, last_loc) };

                for t_rank in 0..=rb.steps.len() {
                    let bprev = location_before(input, rb, t_rank);
                    let bnext = location_from(input, rb, t_rank);
                    let insertion = input.leg(t, bprev, Some(head))
                        + internal
                        + input.leg(t, Some(tail), bnext)
                        - input.leg(t, bprev, bnext);

                    let mut gain = -(removal + insertion);
                    gain.cost += releases - activates;

                    try_candidate(
                        input,
                        ctx,
                        best,
                        Candidate {
                            move_: Move::OrOpt { s_route: s, s_rank, len, t_route: t, t_rank, reversed },
                            gain,
                            priority_gain: 0,
                            assigned_delta: 0,
                            activated_fixed: activates,
                            t_route: t,
                            s_rank,
                        },
                    );
                }
            }
        }
    }
}

/// Scans segment moves within one route, in both orientations.
pub(crate) fn scan_intra(input: &Input, ctx: &SolutionContext, route: usize, best: &mut Option<Candidate>) {
    let r = &ctx.solution.routes[route];
    let state = &ctx.states[route];
    let n = r.steps.len();

    for len in SEGMENT_LENGTHS {
        if n < len + 1 {
            continue;
        }

        for s_rank in 0..=n - len {
            let last = s_rank + len - 1;
            if segment_locked(ctx, route, s_rank, last) || !segment_pairs_whole(input, r, s_rank, last) {
                continue;
            }
            let pair_free = segment_pair_free(input, r, s_rank, last);

            let first_loc = input.jobs[r.steps[s_rank]].location;
            let last_loc = input.jobs[r.steps[last]].location;
            let prev = location_before(input, r, s_rank);
            let next = location_from(input, r, last + 1);
            let removal = input.leg(route, prev, next)
                - input.leg(route, prev, Some(first_loc))
                - state.segment(s_rank, last)
                - input.leg(route, Some(last_loc), next);

            for reversed in [false, true] {
                if reversed && !pair_free {
                    continue;
                }
                let internal: Eval =
                    if reversed { state.segment_reversed(s_rank, last) } else { state.segment(s_rank, last) };
                let (head, tail) = if reversed { (last_loc, first_loc) } else { (first_loc, last_loc) };

                for t_rank in (0..=n).filter(|&t| t < s_rank || t > last + 1) {
                    let bprev = location_before(input, r, t_rank);
                    let bnext = location_from(input, r, t_rank);
                    let insertion = input.leg(route, bprev, Some(head))
                        + internal
                        + input.leg(route, Some(tail), bnext)
                        - input.leg(route, bprev, bnext);

                    let gain = -(removal + insertion);

                    try_candidate(
                        input,
                        ctx,
                        best,
                        Candidate {
                            move_: Move::IntraOrOpt { route, s_rank, len, t_rank, reversed },
                            gain,
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
    }
}
