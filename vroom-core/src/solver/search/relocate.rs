#[cfg(test)]
#[path = "../../../tests/unit/solver/search/relocate_test.rs"]
mod relocate_test;

use super::{fixed_delta, try_candidate, Candidate, Move};
use crate::construction::{removal_delta, single_delta, SolutionContext};
use crate::models::problem::JobKind;
use crate::models::Input;

/// Scans single job relocations from the source route into the target route.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    let vb = &input.vehicles[t];

    if ra.is_empty() || vb.max_tasks.is_some_and(|max| rb.steps.len() + 1 > max) {
        return;
    }

    let releases = -fixed_delta(input, s, ra.steps.len(), ra.steps.len() - 1);
    let activates = fixed_delta(input, t, rb.steps.len(), rb.steps.len() + 1);

    for s_rank in 0..ra.steps.len() {
        let job = &input.jobs[ra.steps[s_rank]];
        if job.kind != JobKind::Single || ctx.locked.contains(&ra.steps[s_rank]) || !vb.can_serve(&job.skills) {
            continue;
        }

        let removal = removal_delta(input, ra, s_rank);

        for t_rank in 0..=rb.steps.len() {
            let insertion = single_delta(input, rb, job.location, t_rank);
            let mut gain = -(removal + insertion);
            gain.cost += releases - activates;

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_: Move::Relocate { s_route: s, s_rank, t_route: t, t_rank },
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

/// Scans single job position changes within one route.
pub(crate) fn scan_intra(input: &Input, ctx: &SolutionContext, route: usize, best: &mut Option<Candidate>) {
    let r = &ctx.solution.routes[route];
    let n = r.steps.len();
    if n < 2 {
        return;
    }

    for s_rank in 0..n {
        let job = &input.jobs[r.steps[s_rank]];
        if job.kind != JobKind::Single || ctx.locked.contains(&r.steps[s_rank]) {
            continue;
        }

        let removal = removal_delta(input, r, s_rank);

        for t_rank in (0..=n).filter(|&t| t < s_rank || t > s_rank + 1) {
            let insertion = single_delta(input, r, job.location, t_rank);
            let gain = -(removal + insertion);

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_: Move::IntraRelocate { route, s_rank, t_rank },
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
