//! The neighborhood operator family and the local search driver.
//!
//! Operators are a tagged enum with one dispatch for validity and application, which keeps the
//! hot loop free of virtual calls. Gains are computed closed form inside the per pair scans
//! from the cached route states; [`Move::gain`] recomputes the same value from scratch and
//! backs both the rare expensive operators and the consistency checks.

#[cfg(test)]
#[path = "../../../tests/unit/solver/search/search_test.rs"]
mod search_test;

pub(crate) mod cross_exchange;
pub(crate) mod exchange;
pub(crate) mod or_opt;
pub(crate) mod pd_shift;
pub(crate) mod priority_replace;
pub(crate) mod relocate;
pub(crate) mod route_exchange;
pub(crate) mod swap_star;
pub(crate) mod two_opt;

mod local_search;
mod ruin_recreate;

use crate::construction::{InsertionPosition, RouteState, SolutionContext};
use crate::models::common::{Cost, Duration, Eval, Location};
use crate::models::problem::JobKind;
use crate::models::solution::simulate;
use crate::models::Input;
use crate::solver::SolverConfig;
use crate::utils::{DefaultRandom, Environment};

/// Improves one run's solution to a local search fixpoint, then alternates ruin and recreate
/// perturbations with further local search, keeping the best result.
pub fn refine(
    input: &Input,
    ctx: &mut SolutionContext,
    config: &SolverConfig,
    environment: &Environment,
    random: &DefaultRandom,
    lambda: f64,
    regret_rank: usize,
) {
    local_search::improve(input, ctx, config.exploration_budget, environment);

    for _ in 0..config.perturbation_passes {
        if environment.is_stopped() {
            break;
        }

        let mut trial = ctx.clone();
        ruin_recreate::perturb(input, &mut trial, random, lambda, regret_rank);
        local_search::improve(input, &mut trial, config.exploration_budget, environment);

        let current = crate::solver::Indicators::of(input, ctx);
        let candidate = crate::solver::Indicators::of(input, &trial);
        if candidate.better_than(&current) {
            *ctx = trial;
        }
    }
}

/// A neighborhood move, parameterized by source and target routes and ranks. Ranks always
/// refer to the routes as they are before the move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Move {
    /// Move one job from a route to another one.
    Relocate {
        /// Source route.
        s_route: usize,
        /// Source rank.
        s_rank: usize,
        /// Target route.
        t_route: usize,
        /// Target insertion rank.
        t_rank: usize,
    },
    /// Move one job to another position of the same route.
    IntraRelocate {
        /// The route.
        route: usize,
        /// Source rank.
        s_rank: usize,
        /// Insertion position in original indexing, outside `s_rank..=s_rank + 1`.
        t_rank: usize,
    },
    /// Swap two jobs, one per route.
    Exchange {
        /// Source route.
        s_route: usize,
        /// Source rank.
        s_rank: usize,
        /// Target route.
        t_route: usize,
        /// Target rank.
        t_rank: usize,
    },
    /// Swap two non adjacent jobs of the same route.
    IntraExchange {
        /// The route.
        route: usize,
        /// First rank.
        s_rank: usize,
        /// Second rank, at least two past the first one.
        t_rank: usize,
    },
    /// Move a short segment to another route, optionally reversed.
    OrOpt {
        /// Source route.
        s_route: usize,
        /// First segment rank.
        s_rank: usize,
        /// Segment length, two or three.
        len: usize,
        /// Target route.
        t_route: usize,
        /// Target insertion rank.
        t_rank: usize,
        /// Whether the segment is reinserted reversed.
        reversed: bool,
    },
    /// Move a short segment within its route, optionally reversed.
    IntraOrOpt {
        /// The route.
        route: usize,
        /// First segment rank.
        s_rank: usize,
        /// Segment length, two or three.
        len: usize,
        /// Insertion position in original indexing, outside the segment.
        t_rank: usize,
        /// Whether the segment is reinserted reversed.
        reversed: bool,
    },
    /// Exchange route suffixes at the given cut points.
    TwoOpt {
        /// Source route.
        s_route: usize,
        /// Source cut: the source route keeps ranks before it.
        s_cut: usize,
        /// Target route.
        t_route: usize,
        /// Target cut.
        t_cut: usize,
    },
    /// Exchange route suffixes, both reversed on arrival.
    ReverseTwoOpt {
        /// Source route.
        s_route: usize,
        /// Source cut.
        s_cut: usize,
        /// Target route.
        t_route: usize,
        /// Target cut.
        t_cut: usize,
    },
    /// Reverse a sub sequence of one route.
    IntraTwoOpt {
        /// The route.
        route: usize,
        /// First reversed rank.
        s_rank: usize,
        /// Last reversed rank, past the first one.
        t_rank: usize,
    },
    /// Swap two two-job segments between routes, with optional reversals.
    CrossExchange {
        /// Source route.
        s_route: usize,
        /// Source segment first rank.
        s_rank: usize,
        /// Target route.
        t_route: usize,
        /// Target segment first rank.
        t_rank: usize,
        /// Whether the source segment arrives reversed.
        reverse_s: bool,
        /// Whether the target segment arrives reversed.
        reverse_t: bool,
    },
    /// Swap one job against a two-job segment across routes.
    MixedExchange {
        /// Source route, giving the single job.
        s_route: usize,
        /// Source rank.
        s_rank: usize,
        /// Target route, giving the segment.
        t_route: usize,
        /// Target segment first rank.
        t_rank: usize,
        /// Whether the segment arrives reversed.
        reversed: bool,
    },
    /// Swap one job per route with free reinsertion positions.
    SwapStar {
        /// Source route.
        s_route: usize,
        /// Source rank.
        s_rank: usize,
        /// Target route.
        t_route: usize,
        /// Target rank.
        t_rank: usize,
        /// Insertion rank of the target job into the source route, after the removal.
        s_insert: usize,
        /// Insertion rank of the source job into the target route, after the removal.
        t_insert: usize,
    },
    /// Move a whole shipment to another route.
    PdShift {
        /// Source route.
        s_route: usize,
        /// Pickup rank in the source route.
        pickup_rank: usize,
        /// Delivery rank in the source route.
        delivery_rank: usize,
        /// Target route.
        t_route: usize,
        /// Pickup insertion rank in the target route.
        t_pickup: usize,
        /// Delivery insertion rank, counted after the pickup insertion.
        t_delivery: usize,
    },
    /// Swap the whole job sequences of two routes.
    RouteExchange {
        /// Source route.
        s_route: usize,
        /// Target route.
        t_route: usize,
    },
    /// Replace an assigned job by an unassigned one with a higher priority.
    PriorityReplace {
        /// The route.
        route: usize,
        /// Rank of the replaced job.
        s_rank: usize,
        /// The unassigned job, a pickup standing for its whole shipment.
        job: usize,
        /// Where the unassigned job goes after the removal.
        position: InsertionPosition,
    },
    /// Swap an assigned job against an unassigned one of equal priority.
    UnassignedExchange {
        /// The route.
        route: usize,
        /// Rank of the replaced job.
        s_rank: usize,
        /// The unassigned job, a pickup standing for its whole shipment.
        job: usize,
        /// Where the unassigned job goes after the removal.
        position: InsertionPosition,
    },
}

impl Move {
    /// Builds the post move step sequences of the affected routes.
    pub(crate) fn candidate_routes(&self, input: &Input, ctx: &SolutionContext) -> Vec<(usize, Vec<usize>)> {
        let steps = |route: usize| ctx.solution.routes[route].steps.clone();

        match *self {
            Move::Relocate { s_route, s_rank, t_route, t_rank } => {
                let mut sa = steps(s_route);
                let job = sa.remove(s_rank);
                let mut sb = steps(t_route);
                sb.insert(t_rank, job);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::IntraRelocate { route, s_rank, t_rank } => {
                let mut sa = steps(route);
                let job = sa.remove(s_rank);
                let at = if t_rank > s_rank { t_rank - 1 } else { t_rank };
                sa.insert(at, job);
                vec![(route, sa)]
            }
            Move::Exchange { s_route, s_rank, t_route, t_rank } => {
                let mut sa = steps(s_route);
                let mut sb = steps(t_route);
                std::mem::swap(&mut sa[s_rank], &mut sb[t_rank]);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::IntraExchange { route, s_rank, t_rank } => {
                let mut sa = steps(route);
                sa.swap(s_rank, t_rank);
                vec![(route, sa)]
            }
            Move::OrOpt { s_route, s_rank, len, t_route, t_rank, reversed } => {
                let mut sa = steps(s_route);
                let mut segment: Vec<_> = sa.drain(s_rank..s_rank + len).collect();
                if reversed {
                    segment.reverse();
                }
                let mut sb = steps(t_route);
                sb.splice(t_rank..t_rank, segment);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::IntraOrOpt { route, s_rank, len, t_rank, reversed } => {
                let mut sa = steps(route);
                let mut segment: Vec<_> = sa.drain(s_rank..s_rank + len).collect();
                if reversed {
                    segment.reverse();
                }
                let at = if t_rank > s_rank { t_rank - len } else { t_rank };
                sa.splice(at..at, segment);
                vec![(route, sa)]
            }
            Move::TwoOpt { s_route, s_cut, t_route, t_cut } => {
                let mut sa = steps(s_route);
                let mut sb = steps(t_route);
                let tail_a = sa.split_off(s_cut);
                let tail_b = sb.split_off(t_cut);
                sa.extend(tail_b);
                sb.extend(tail_a);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::ReverseTwoOpt { s_route, s_cut, t_route, t_cut } => {
                let mut sa = steps(s_route);
                let mut sb = steps(t_route);
                let tail_a = sa.split_off(s_cut);
                let tail_b = sb.split_off(t_cut);
                sa.extend(tail_b.into_iter().rev());
                sb.extend(tail_a.into_iter().rev());
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::IntraTwoOpt { route, s_rank, t_rank } => {
                let mut sa = steps(route);
                sa[s_rank..=t_rank].reverse();
                vec![(route, sa)]
            }
            Move::CrossExchange { s_route, s_rank, t_route, t_rank, reverse_s, reverse_t } => {
                let mut sa = steps(s_route);
                let mut sb = steps(t_route);
                let mut seg_a: Vec<_> = sa.drain(s_rank..s_rank + 2).collect();
                let mut seg_b: Vec<_> = sb.drain(t_rank..t_rank + 2).collect();
                if reverse_s {
                    seg_a.reverse();
                }
                if reverse_t {
                    seg_b.reverse();
                }
                sa.splice(s_rank..s_rank, seg_b);
                sb.splice(t_rank..t_rank, seg_a);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::MixedExchange { s_route, s_rank, t_route, t_rank, reversed } => {
                let mut sa = steps(s_route);
                let mut sb = steps(t_route);
                let job = sa.remove(s_rank);
                let mut segment: Vec<_> = sb.drain(t_rank..t_rank + 2).collect();
                if reversed {
                    segment.reverse();
                }
                sa.splice(s_rank..s_rank, segment);
                sb.insert(t_rank, job);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::SwapStar { s_route, s_rank, t_route, t_rank, s_insert, t_insert } => {
                let mut sa = steps(s_route);
                let mut sb = steps(t_route);
                let a = sa.remove(s_rank);
                let b = sb.remove(t_rank);
                sa.insert(s_insert, b);
                sb.insert(t_insert, a);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::PdShift { s_route, pickup_rank, delivery_rank, t_route, t_pickup, t_delivery } => {
                let mut sa = steps(s_route);
                let delivery = sa.remove(delivery_rank);
                let pickup = sa.remove(pickup_rank);
                let mut sb = steps(t_route);
                sb.insert(t_pickup, pickup);
                sb.insert(t_delivery, delivery);
                vec![(s_route, sa), (t_route, sb)]
            }
            Move::RouteExchange { s_route, t_route } => {
                vec![(s_route, steps(t_route)), (t_route, steps(s_route))]
            }
            Move::PriorityReplace { route, s_rank, job, position }
            | Move::UnassignedExchange { route, s_rank, job, position } => {
                let mut sa = steps(route);
                let removed = sa[s_rank];
                let partner = input.jobs[removed].partner;
                sa.retain(|&step| step != removed && Some(step) != partner);
                match position {
                    InsertionPosition::Single { rank } => sa.insert(rank, job),
                    InsertionPosition::Pair { pickup_rank, delivery_rank } => {
                        let delivery = input.jobs[job].partner.expect("paired at build");
                        sa.insert(pickup_rank, job);
                        sa.insert(delivery_rank, delivery);
                    }
                }
                vec![(route, sa)]
            }
        }
    }

    /// Recomputes the exact gain of the move: old route evaluations and fixed costs minus the
    /// post move ones. The scans compute the same value closed form; this form backs the
    /// expensive whole-route operators and the consistency assertions.
    pub fn gain(&self, input: &Input, ctx: &SolutionContext) -> Eval {
        let candidates = self.candidate_routes(input, ctx);

        let mut gain = Eval::default();
        for (vehicle, steps) in candidates.iter() {
            let old_state = &ctx.states[*vehicle];
            let old_fixed =
                if ctx.solution.routes[*vehicle].is_empty() { 0 } else { input.vehicles[*vehicle].costs.fixed };
            let new = route_eval(input, *vehicle, steps);
            let new_fixed = if steps.is_empty() { 0 } else { input.vehicles[*vehicle].costs.fixed };

            gain += old_state.eval_total - new;
            gain.cost += old_fixed - new_fixed;
        }

        gain
    }

    /// Checks capacity, schedule, pairing and travel maxima feasibility of the post move
    /// routes. Called only for candidates whose gain beats the current best, so the linear
    /// walks here stay off the hot path.
    pub fn is_valid(&self, input: &Input, ctx: &SolutionContext) -> bool {
        self.candidate_routes(input, ctx).iter().all(|(vehicle, steps)| route_ok(input, *vehicle, steps))
    }

    /// Applies the move, rebuilds the touched route states and returns the touched routes.
    pub fn apply(&self, input: &Input, ctx: &mut SolutionContext) -> Vec<usize> {
        // assignment swapping moves also maintain the unassigned set
        match *self {
            Move::PriorityReplace { route, s_rank, job, .. } | Move::UnassignedExchange { route, s_rank, job, .. } => {
                let removed = ctx.solution.routes[route].steps[s_rank];
                ctx.solution.unassigned.insert(removed);
                if let Some(partner) = input.jobs[removed].partner {
                    ctx.solution.unassigned.insert(partner);
                }
                ctx.solution.unassigned.remove(&job);
                if let Some(partner) = input.jobs[job].partner {
                    ctx.solution.unassigned.remove(&partner);
                }
            }
            _ => {}
        }

        let candidates = self.candidate_routes(input, ctx);
        let mut touched = Vec::with_capacity(candidates.len());
        for (vehicle, steps) in candidates {
            ctx.solution.routes[vehicle].steps = steps;
            ctx.rebuild(input, vehicle);
            touched.push(vehicle);
        }

        touched
    }

    /// Returns the jobs becoming eligible for re-insertion scans after the move.
    pub fn addition_candidates(&self, input: &Input, ctx: &SolutionContext) -> Vec<usize> {
        match *self {
            Move::PriorityReplace { route, s_rank, .. } | Move::UnassignedExchange { route, s_rank, .. } => {
                let removed = ctx.solution.routes[route].steps[s_rank];
                let mut jobs = vec![removed];
                jobs.extend(input.jobs[removed].partner);
                jobs
            }
            _ => vec![],
        }
    }

    /// Returns the jobs leaving the unassigned set when the move applies.
    pub fn removal_candidates(&self, input: &Input) -> Vec<usize> {
        match *self {
            Move::PriorityReplace { job, .. } | Move::UnassignedExchange { job, .. } => {
                let mut jobs = vec![job];
                jobs.extend(input.jobs[job].partner);
                jobs
            }
            _ => vec![],
        }
    }
}

/// A scored move: the gain is computed once during the scan and cached here together with the
/// tie break data.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
    pub move_: Move,
    /// Travel evaluation gain, positive cost means improvement.
    pub gain: Eval,
    /// Assigned priority sum change.
    pub priority_gain: i64,
    /// Assigned task count change.
    pub assigned_delta: i64,
    /// Fixed cost newly activated by the move, first tie break.
    pub activated_fixed: Cost,
    /// Target route index, second tie break.
    pub t_route: usize,
    /// Source rank, last tie break.
    pub s_rank: usize,
}

impl Candidate {
    /// Checks whether applying the move strictly improves the lexicographic objective.
    pub fn improves(&self) -> bool {
        (self.priority_gain, self.assigned_delta, self.gain.cost, self.gain.duration) > (0, 0, 0, 0)
    }

    /// A totally ordered selection key, smaller is better: objective gain first, then the
    /// deterministic tie breaks.
    pub fn key(&self) -> (i64, i64, Cost, Duration, Cost, usize, usize) {
        (
            -self.priority_gain,
            -self.assigned_delta,
            -self.gain.cost,
            -self.gain.duration,
            self.activated_fixed,
            self.t_route,
            self.s_rank,
        )
    }

}

/// Scans every operator class for the ordered route pair and keeps the best valid improving
/// candidate.
pub(crate) fn scan_pair(input: &Input, ctx: &SolutionContext, s: usize, t: usize) -> Option<Candidate> {
    let mut best = None;

    if s == t {
        relocate::scan_intra(input, ctx, s, &mut best);
        exchange::scan_intra(input, ctx, s, &mut best);
        or_opt::scan_intra(input, ctx, s, &mut best);
        two_opt::scan_intra(input, ctx, s, &mut best);
        priority_replace::scan(input, ctx, s, &mut best);
    } else {
        relocate::scan(input, ctx, s, t, &mut best);
        exchange::scan(input, ctx, s, t, &mut best);
        or_opt::scan(input, ctx, s, t, &mut best);
        two_opt::scan(input, ctx, s, t, &mut best);
        cross_exchange::scan(input, ctx, s, t, &mut best);
        swap_star::scan(input, ctx, s, t, &mut best);
        pd_shift::scan(input, ctx, s, t, &mut best);
        route_exchange::scan(input, ctx, s, t, &mut best);
    }

    best
}

/// Evaluates the travel of a whole step sequence under the given vehicle, start and end legs
/// included.
pub(crate) fn route_eval(input: &Input, vehicle: usize, steps: &[usize]) -> Eval {
    if steps.is_empty() {
        return Eval::default();
    }

    let v = &input.vehicles[vehicle];
    let mut eval = Eval::default();
    let mut prev = v.start;
    for &step in steps.iter() {
        let location = input.jobs[step].location;
        eval += input.leg(vehicle, prev, Some(location));
        prev = Some(location);
    }
    eval += input.leg(vehicle, prev, v.end);

    eval
}

/// Full feasibility check of a step sequence: pairing, task count, capacity, travel maxima and
/// schedule.
pub(crate) fn route_ok(input: &Input, vehicle: usize, steps: &[usize]) -> bool {
    let v = &input.vehicles[vehicle];

    if v.max_tasks.is_some_and(|max| steps.len() > max) {
        return false;
    }
    if !pairs_ok(input, steps) {
        return false;
    }
    if !crate::construction::capacity_ok(input, vehicle, steps) {
        return false;
    }

    if v.max_travel_time.is_some() || v.max_distance.is_some() {
        let eval = route_eval(input, vehicle, steps);
        if v.max_travel_time.is_some_and(|max| eval.duration > max)
            || v.max_distance.is_some_and(|max| eval.distance > max)
        {
            return false;
        }
    }

    let time_matters = v.time_window != crate::models::common::TimeWindow::max()
        || !v.breaks.is_empty()
        || steps.iter().any(|&step| input.jobs[step].is_time_constrained());

    !time_matters || simulate(input, vehicle, steps).is_some()
}

/// Checks that every shipment in the sequence is whole and ordered pickup first.
pub(crate) fn pairs_ok(input: &Input, steps: &[usize]) -> bool {
    let mut open = hashbrown::HashSet::new();

    for &step in steps.iter() {
        match input.jobs[step].kind {
            JobKind::Single => {}
            JobKind::Pickup => {
                open.insert(step);
            }
            JobKind::Delivery => {
                let pickup = input.jobs[step].partner.expect("paired at build");
                if !open.remove(&pickup) {
                    return false;
                }
            }
        }
    }

    open.is_empty()
}

/// Checks whether two vehicles evaluate travel identically, so that cached cumulative sums of
/// one route transfer to the other vehicle.
pub(crate) fn vehicles_equivalent(input: &Input, a: usize, b: usize) -> bool {
    let (va, vb) = (&input.vehicles[a], &input.vehicles[b]);

    va.profile == vb.profile
        && va.speed_factor == vb.speed_factor
        && va.costs.per_hour == vb.costs.per_hour
        && va.costs.per_km == vb.costs.per_km
}

/// Evaluates the internal travel of route ranks `from..=to` under another vehicle, reusing the
/// cached sums when both vehicles evaluate identically.
pub(crate) fn segment_eval_via(
    input: &Input,
    target_vehicle: usize,
    route: &crate::models::solution::Route,
    state: &RouteState,
    from: usize,
    to: usize,
    reversed: bool,
) -> Eval {
    if vehicles_equivalent(input, route.vehicle, target_vehicle) {
        return if reversed { state.segment_reversed(from, to) } else { state.segment(from, to) };
    }

    let locations = route.steps[from..=to].iter().map(|&step| input.jobs[step].location);
    if reversed {
        path_eval(input, target_vehicle, locations.rev())
    } else {
        path_eval(input, target_vehicle, locations)
    }
}

/// Sums consecutive edges over a location path for the given vehicle.
pub(crate) fn path_eval(input: &Input, vehicle: usize, locations: impl Iterator<Item = Location>) -> Eval {
    let mut eval = Eval::default();
    let mut prev: Option<Location> = None;
    for location in locations {
        if let Some(prev) = prev {
            eval += input.eval(vehicle, prev, location);
        }
        prev = Some(location);
    }

    eval
}

/// The fixed cost charged for a route of the given length.
pub(crate) fn charged(input: &Input, vehicle: usize, len: usize) -> Cost {
    if len > 0 {
        input.vehicles[vehicle].costs.fixed
    } else {
        0
    }
}

/// Fixed cost delta caused by a route length change: positive when an unused vehicle gets
/// activated, negative when a route empties out.
pub(crate) fn fixed_delta(input: &Input, vehicle: usize, old_len: usize, new_len: usize) -> Cost {
    let fixed = input.vehicles[vehicle].costs.fixed;
    match (old_len > 0, new_len > 0) {
        (false, true) => fixed,
        (true, false) => -fixed,
        _ => 0,
    }
}

/// Checks whether moving the closed range `from..=to` out of the route keeps every shipment
/// whole: each half inside must have its partner inside too.
pub(crate) fn segment_pairs_whole(input: &Input, route: &crate::models::solution::Route, from: usize, to: usize) -> bool {
    route.steps[from..=to].iter().all(|&step| match input.jobs[step].partner {
        None => true,
        Some(partner) => route.steps[from..=to].contains(&partner),
    })
}

/// Checks whether a closed range contains no shipment half at all, required by reversals.
pub(crate) fn segment_pair_free(input: &Input, route: &crate::models::solution::Route, from: usize, to: usize) -> bool {
    route.steps[from..=to].iter().all(|&step| input.jobs[step].kind == JobKind::Single)
}

/// Checks whether any job of the closed range is pinned by forced steps.
pub(crate) fn segment_locked(ctx: &SolutionContext, route: usize, from: usize, to: usize) -> bool {
    ctx.solution.routes[route].steps[from..=to].iter().any(|step| ctx.locked.contains(step))
}

/// Records a candidate when it improves the objective, beats the current best and survives the
/// full validity check. Validity runs only for would-be winners, keeping its linear walks off
/// the scanning hot path.
pub(crate) fn try_candidate(input: &Input, ctx: &SolutionContext, best: &mut Option<Candidate>, candidate: Candidate) {
    if !candidate.improves() {
        return;
    }
    if best.is_some_and(|current| current.key() <= candidate.key()) {
        return;
    }
    if candidate.move_.is_valid(input, ctx) {
        *best = Some(candidate);
    }
}

/// Travel evaluation delta of serving another location at the given rank instead of the
/// current one.
pub(crate) fn replace_delta(
    input: &Input,
    route: &crate::models::solution::Route,
    rank: usize,
    location: Location,
) -> Eval {
    let old = input.jobs[route.steps[rank]].location;
    let prev = crate::construction::location_before(input, route, rank);
    let next = crate::construction::location_from(input, route, rank + 1);

    input.leg(route.vehicle, prev, Some(location)) + input.leg(route.vehicle, Some(location), next)
        - input.leg(route.vehicle, prev, Some(old))
        - input.leg(route.vehicle, Some(old), next)
}

/// Travel evaluation delta of removing both halves of a shipment from their route.
pub(crate) fn pair_removal_delta(
    input: &Input,
    route: &crate::models::solution::Route,
    pickup_rank: usize,
    delivery_rank: usize,
) -> Eval {
    debug_assert!(pickup_rank < delivery_rank);

    if delivery_rank == pickup_rank + 1 {
        let pickup = input.jobs[route.steps[pickup_rank]].location;
        let delivery = input.jobs[route.steps[delivery_rank]].location;
        let prev = crate::construction::location_before(input, route, pickup_rank);
        let next = crate::construction::location_from(input, route, delivery_rank + 1);

        input.leg(route.vehicle, prev, next)
            - input.leg(route.vehicle, prev, Some(pickup))
            - input.leg(route.vehicle, Some(pickup), Some(delivery))
            - input.leg(route.vehicle, Some(delivery), next)
    } else {
        crate::construction::removal_delta(input, route, pickup_rank)
            + crate::construction::removal_delta(input, route, delivery_rank)
    }
}

/// Debug only structural audit of the whole context: partition, pairing, capacity, schedule.
pub(crate) fn assert_consistent(input: &Input, ctx: &SolutionContext) {
    if !cfg!(debug_assertions) {
        return;
    }

    let mut seen = vec![false; input.jobs.len()];
    for route in ctx.solution.routes.iter() {
        for &step in route.steps.iter() {
            assert!(!seen[step], "job {} assigned twice", input.jobs[step].id);
            seen[step] = true;
        }
        assert!(pairs_ok(input, &route.steps), "split shipment in a route");
        assert!(
            crate::construction::capacity_ok(input, route.vehicle, &route.steps),
            "overloaded route for vehicle {}",
            input.vehicles[route.vehicle].id
        );
        assert!(simulate(input, route.vehicle, &route.steps).is_some(), "unschedulable route");
    }
    for &job in ctx.solution.unassigned.iter() {
        assert!(!seen[job], "job {} both assigned and unassigned", input.jobs[job].id);
        seen[job] = true;
    }
    assert!(seen.iter().all(|&s| s), "job lost from the partition");
}
