#[cfg(test)]
#[path = "../../../tests/unit/solver/search/cross_exchange_test.rs"]
mod cross_exchange_test;

use super::{segment_locked, segment_pair_free, segment_pairs_whole, try_candidate, Candidate, Move};
use crate::construction::{location_before, location_from, SolutionContext};
use crate::models::common::{Eval, Location};
use crate::models::problem::JobKind;
use crate::models::solution::Route;
use crate::models::Input;

/// Scans swaps of two-job segments between routes, each arriving in either orientation, and
/// swaps of one job against a two-job segment.
pub(crate) fn scan(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    scan_cross(input, ctx, s, t, best);
    scan_mixed(input, ctx, s, t, best);
}

fn scan_cross(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    if ra.steps.len() < 2 || rb.steps.len() < 2 || s > t {
        // segment swaps are symmetric, scanning the ordered pair once is enough
        return;
    }

    for s_rank in 0..ra.steps.len() - 1 {
        let Some(seg_a) = segment_facts(input, ctx, s, ra, s_rank, t) else {
            continue;
        };

        for t_rank in 0..rb.steps.len() - 1 {
            let Some(seg_b) = segment_facts(input, ctx, t, rb, t_rank, s) else {
                continue;
            };

            for reverse_s in [false, true] {
                if reverse_s && !seg_a.pair_free {
                    continue;
                }
                for reverse_t in [false, true] {
                    if reverse_t && !seg_b.pair_free {
                        continue;
                    }

                    let delta_a = splice_delta(input, ra, s_rank, &seg_b, reverse_t);
                    let delta_b = splice_delta(input, rb, t_rank, &seg_a, reverse_s);
                    let gain = -(delta_a + delta_b);

                    try_candidate(
                        input,
                        ctx,
                        best,
                        Candidate {
                            move_: Move::CrossExchange { s_route: s, s_rank, t_route: t, t_rank, reverse_s, reverse_t },
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
    }
}

fn scan_mixed(input: &Input, ctx: &SolutionContext, s: usize, t: usize, best: &mut Option<Candidate>) {
    let ra = &ctx.solution.routes[s];
    let rb = &ctx.solution.routes[t];
    if ra.is_empty() || rb.steps.len() < 2 {
        return;
    }

    let va = &input.vehicles[s];
    let vb = &input.vehicles[t];
    if va.max_tasks.is_some_and(|max| ra.steps.len() + 1 > max) {
        return;
    }

    for s_rank in 0..ra.steps.len() {
        let a = &input.jobs[ra.steps[s_rank]];
        if a.kind != JobKind::Single || ctx.locked.contains(&ra.steps[s_rank]) || !vb.can_serve(&a.skills) {
            continue;
        }

        for t_rank in 0..rb.steps.len() - 1 {
            let Some(seg_b) = segment_facts(input, ctx, t, rb, t_rank, s) else {
                continue;
            };

            for reversed in [false, true] {
                if reversed && !seg_b.pair_free {
                    continue;
                }

                // the single job replaces the segment, the segment replaces the job
                let delta_a = splice_single_for_segment(input, ra, s_rank, &seg_b, reversed);
                let delta_b = splice_segment_for_single(input, rb, t_rank, a.location);
                let gain = -(delta_a + delta_b);

                try_candidate(
                    input,
                    ctx,
                    best,
                    Candidate {
                        move_: Move::MixedExchange { s_route: s, s_rank, t_route: t, t_rank, reversed },
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
}

/// Locations and safety facts of a two-job segment.
struct SegmentFacts {
    first: Location,
    second: Location,
    edge: Eval,
    edge_reversed: Eval,
    pair_free: bool,
}

fn segment_facts(
    input: &Input,
    ctx: &SolutionContext,
    route_index: usize,
    route: &Route,
    rank: usize,
    receiver: usize,
) -> Option<SegmentFacts> {
    if segment_locked(ctx, route_index, rank, rank + 1) || !segment_pairs_whole(input, route, rank, rank + 1) {
        return None;
    }
    let vr = &input.vehicles[receiver];
    if !route.steps[rank..=rank + 1].iter().all(|&step| vr.can_serve(&input.jobs[step].skills)) {
        return None;
    }

    let first = input.jobs[route.steps[rank]].location;
    let second = input.jobs[route.steps[rank + 1]].location;

    Some(SegmentFacts {
        first,
        second,
        edge: input.eval(receiver, first, second),
        edge_reversed: input.eval(receiver, second, first),
        pair_free: segment_pair_free(input, route, rank, rank + 1),
    })
}

/// Delta of replacing the two-job segment at `rank` by the incoming segment.
fn splice_delta(input: &Input, route: &Route, rank: usize, incoming: &SegmentFacts, reversed: bool) -> Eval {
    let old_first = input.jobs[route.steps[rank]].location;
    let old_second = input.jobs[route.steps[rank + 1]].location;
    let prev = location_before(input, route, rank);
    let next = location_from(input, route, rank + 2);
    let v = route.vehicle;

    let (head, tail, edge) = if reversed {
        (incoming.second, incoming.first, incoming.edge_reversed)
    } else {
        (incoming.first, incoming.second, incoming.edge)
    };

    input.leg(v, prev, Some(head)) + edge + input.leg(v, Some(tail), next)
        - input.leg(v, prev, Some(old_first))
        - input.eval(v, old_first, old_second)
        - input.leg(v, Some(old_second), next)
}

/// Delta of replacing the single job at `rank` by the incoming two-job segment.
fn splice_single_for_segment(
    input: &Input,
    route: &Route,
    rank: usize,
    incoming: &SegmentFacts,
    reversed: bool,
) -> Eval {
    let old = input.jobs[route.steps[rank]].location;
    let prev = location_before(input, route, rank);
    let next = location_from(input, route, rank + 1);
    let v = route.vehicle;

    let (head, tail, edge) = if reversed {
        (incoming.second, incoming.first, incoming.edge_reversed)
    } else {
        (incoming.first, incoming.second, incoming.edge)
    };

    input.leg(v, prev, Some(head)) + edge + input.leg(v, Some(tail), next)
        - input.leg(v, prev, Some(old))
        - input.leg(v, Some(old), next)
}

/// Delta of replacing the two-job segment at `rank` by one incoming location.
fn splice_segment_for_single(input: &Input, route: &Route, rank: usize, incoming: Location) -> Eval {
    let old_first = input.jobs[route.steps[rank]].location;
    let old_second = input.jobs[route.steps[rank + 1]].location;
    let prev = location_before(input, route, rank);
    let next = location_from(input, route, rank + 2);
    let v = route.vehicle;

    input.leg(v, prev, Some(incoming)) + input.leg(v, Some(incoming), next)
        - input.leg(v, prev, Some(old_first))
        - input.eval(v, old_first, old_second)
        - input.leg(v, Some(old_second), next)
}
