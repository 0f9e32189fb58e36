#[cfg(test)]
#[path = "../../../tests/unit/solver/search/route_exchange_test.rs"]
mod route_exchange_test;

use super::{charged, route_eval, try_candidate, Candidate, Move};
use crate::construction::SolutionContext;
use crate::models::Input;

/// Scans swapping the whole job sequences of two routes, which pays off when near equivalent
/// vehicles start from different places.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    if s > t || (ra.is_empty() && rb.is_empty()) {
        return;
    }

    let va = &input.vehicles[s];
    let vb = &input.vehicles[t];
    if va.max_tasks.is_some_and(|max| rb.steps.len() > max) || vb.max_tasks.is_some_and(|max| ra.steps.len() > max) {
        return;
    }
    if ra.steps.iter().any(|step| ctx.locked.contains(step)) || rb.steps.iter().any(|step| ctx.locked.contains(step)) {
        return;
    }
    if !ra.steps.iter().all(|&step| vb.can_serve(&input.jobs[step].skills))
        || !rb.steps.iter().all(|&step| va.can_serve(&input.jobs[step].skills))
    {
        return;
    }

    let old = ctx.states[s].eval_total + ctx.states[t].eval_total;
    let new = route_eval(input, s, &rb.steps) + route_eval(input, t, &ra.steps);
    let fixed_old = charged(input, s, ra.steps.len()) + charged(input, t, rb.steps.len());
    let fixed_new = charged(input, s, rb.steps.len()) + charged(input, t, ra.steps.len());

    let mut gain = old - new;
    gain.cost += fixed_old - fixed_new;

    try_candidate(
        input,
        ctx,
        best,
        Candidate {
            move_: Move::RouteExchange { s_route: s, t_route: t },
            gain,
            priority_gain: 0,
            assigned_delta: 0,
            activated_fixed: (fixed_new - fixed_old).max(0),
            t_route: t,
            s_rank: 0,
        },
    );
}
