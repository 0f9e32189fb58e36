#[cfg(test)]
#[path = "../../../tests/unit/solver/search/exchange_test.rs"]
mod exchange_test;

use super::{replace_delta, try_candidate, Candidate, Move};
use crate::construction::SolutionContext;
use crate::models::problem::JobKind;
use crate::models::Input;

/// Scans one-for-one single job swaps between two routes.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    let va = &input.vehicles[s];
    let vb = &input.vehicles[t];

    for s_rank in 0..ra.steps.len() {
        let a = &input.jobs[ra.steps[s_rank]];
        if a.kind != JobKind::Single || ctx.locked.contains(&ra.steps[s_rank]) || !vb.can_serve(&a.skills) {
            continue;
        }

        for t_rank in 0..rb.steps.len() {
            let b = &input.jobs[rb.steps[t_rank]];
            if b.kind != JobKind::Single || ctx.locked.contains(&rb.steps[t_rank]) || !va.can_serve(&b.skills) {
                continue;
            }

            let gain = -(replace_delta(input, ra, s_rank, b.location) + replace_delta(input, rb, t_rank, a.location));

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_: Move::Exchange { s_route: s, s_rank, t_route: t, t_rank },
                    gain,
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

/// Scans swaps of two non adjacent jobs inside one route.
pub(crate) fn scan_intra(input: &Input, ctx: &SolutionContext, route: usize, best: &mut Option<Candidate>) {
    let r = &ctx.solution.routes[route];
    let n = r.steps.len();

    for s_rank in 0..n.saturating_sub(2) {
        let a = &input.jobs[r.steps[s_rank]];
        if a.kind != JobKind::Single || ctx.locked.contains(&r.steps[s_rank]) {
            continue;
        }

        for t_rank in s_rank + 2..n {
            let b = &input.jobs[r.steps[t_rank]];
            if b.kind != JobKind::Single || ctx.locked.contains(&r.steps[t_rank]) {
                continue;
            }

            let gain = -(replace_delta(input, r, s_rank, b.location) + replace_delta(input, r, t_rank, a.location));

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_: Move::IntraExchange { route, s_rank, t_rank },
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
