#[cfg(test)]
#[path = "../../../tests/unit/solver/search/priority_replace_test.rs"]
mod priority_replace_test;

use super::{pair_removal_delta, try_candidate, Candidate, Move};
use crate::construction::{evaluate_job_insertion, removal_delta, RouteState, SolutionContext};
use crate::models::common::Eval;
use crate::models::problem::JobKind;
use crate::models::solution::Route;
use crate::models::Input;

/// Scans swapping an assigned job of the route against an unassigned one: a higher priority
/// newcomer replaces regardless of cost, an equal priority one only when it travels cheaper.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, route: usize, best: &mut Option<Candidate>) {
    if ctx.solution.unassigned.is_empty() || ctx.solution.routes[route].is_empty() {
        return;
    }

    let r = &ctx.solution.routes[route];

    for s_rank in 0..r.steps.len() {
        let outgoing = r.steps[s_rank];
        let data = &input.jobs[outgoing];
        // pairs leave via their pickup, deliveries would double count
        if data.kind == JobKind::Delivery || ctx.locked.contains(&outgoing) {
            continue;
        }
        let partner = data.partner;
        if partner.is_some_and(|p| ctx.locked.contains(&p)) {
            continue;
        }

        let (removal, out_tasks) = match partner {
            None => (removal_delta(input, r, s_rank), 1),
            Some(p) => {
                let delivery_rank = r.rank_of(p).expect("pair in one route");
                (pair_removal_delta(input, r, s_rank, delivery_rank), 2)
            }
        };
        let out_priority = data.priority as i64 * out_tasks;

        // the route without the outgoing job, used to evaluate newcomers exactly
        let mut reduced_steps = r.steps.clone();
        reduced_steps.retain(|&step| step != outgoing && Some(step) != partner);
        let reduced = Route { vehicle: route, steps: reduced_steps };
        let reduced_state = RouteState::new(input, &reduced);

        for &incoming in ctx.solution.unassigned.iter() {
            let candidate = &input.jobs[incoming];
            if candidate.kind == JobKind::Delivery {
                continue;
            }
            let in_tasks: i64 = if candidate.partner.is_some() { 2 } else { 1 };
            let priority_gain = candidate.priority as i64 * in_tasks - out_priority;
            let assigned_delta = in_tasks - out_tasks;
            if priority_gain < 0 || (priority_gain == 0 && assigned_delta < 0) {
                continue;
            }

            let Some(insertion) = evaluate_job_insertion(input, &reduced, &reduced_state, incoming) else {
                continue;
            };

            let gain: Eval = -(removal + insertion.delta);
            let move_ = if priority_gain > 0 {
                Move::PriorityReplace { route, s_rank, job: incoming, position: insertion.position }
            } else {
                Move::UnassignedExchange { route, s_rank, job: incoming, position: insertion.position }
            };

            try_candidate(
                input,
                ctx,
                best,
                Candidate {
                    move_,
                    gain,
                    priority_gain,
                    assigned_delta,
                    activated_fixed: 0,
                    t_route: route,
                    s_rank,
                },
            );
        }
    }
}
