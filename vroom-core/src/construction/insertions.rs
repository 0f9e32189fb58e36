#[cfg(test)]
#[path = "../../tests/unit/construction/insertions_test.rs"]
mod insertions_test;

use crate::construction::evaluators::{evaluate_job_insertion, Insertion, InsertionPosition};
use crate::construction::state::capacity_ok;
use crate::construction::SolutionContext;
use crate::models::common::Cost;
use crate::models::problem::JobKind;
use crate::models::solution::simulate;
use crate::models::Input;
use crate::Error;

/// A regret value standing in for "too few alternatives": jobs with less than the requested
/// amount of feasible vehicles are inserted with the highest urgency.
const SCARCE_REGRET: Cost = Cost::MAX / 8;

/// Construction strategy: fill vehicles one by one, or spread jobs over the whole fleet with a
/// regret criterion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeuristicVariant {
    /// Fill one vehicle to saturation before moving to the next one.
    Sequential,
    /// Insert by regret across all vehicles at once.
    Parallel,
}

/// The (λ, regret rank) seed table. λ weights fleet spreading against raw insertion cost, the
/// rank decides which alternative the regret compares against. Clamped by the configured
/// heuristic count.
pub(crate) const SEEDS: &[(f64, usize)] =
    &[(0., 2), (0.1, 2), (0.5, 2), (1., 2), (0., 3), (0.5, 3), (1., 3), (2., 3)];

/// Builds the shared starting context: every forced vehicle step applied and locked, everything
/// else unassigned. Solver runs clone this once per seed.
pub fn create_base_context(input: &Input) -> Result<SolutionContext, Error> {
    let mut ctx = SolutionContext::new(input);

    for vehicle in 0..input.vehicles.len() {
        let forced = input.forced_jobs(vehicle);
        if forced.is_empty() {
            continue;
        }

        let id = input.vehicles[vehicle].id;
        if simulate(input, vehicle, &forced).is_none() {
            return Err(Error::Input(format!("unschedulable steps for vehicle {id}")));
        }
        if !capacity_ok(input, vehicle, &forced) {
            return Err(Error::Input(format!("overloaded steps for vehicle {id}")));
        }
        if input.vehicles[vehicle].max_tasks.is_some_and(|max| forced.len() > max) {
            return Err(Error::Input(format!("too many steps for vehicle {id}")));
        }

        for &job in forced.iter() {
            if !ctx.solution.unassigned.remove(&job) {
                return Err(Error::Input(format!("step reused across vehicles for vehicle {id}")));
            }
            ctx.locked.insert(job);
        }
        ctx.solution.routes[vehicle].steps = forced;
        ctx.rebuild(input, vehicle);

        let state = &ctx.states[vehicle];
        let data = &input.vehicles[vehicle];
        if data.max_travel_time.is_some_and(|max| state.eval_total.duration > max)
            || data.max_distance.is_some_and(|max| state.eval_total.distance > max)
        {
            return Err(Error::Input(format!("steps beyond travel maxima for vehicle {id}")));
        }
    }

    Ok(ctx)
}

/// Builds an initial solution from the base context with the given variant and seed.
pub fn build_initial_solution(
    input: &Input,
    base: &SolutionContext,
    variant: HeuristicVariant,
    lambda: f64,
    regret_rank: usize,
) -> SolutionContext {
    let mut ctx = base.clone();
    match variant {
        HeuristicVariant::Sequential => sequential_fill(input, &mut ctx, lambda),
        HeuristicVariant::Parallel => recreate(input, &mut ctx, lambda, regret_rank),
    }

    ctx
}

/// Inserts every insertable unassigned job by the regret criterion across all vehicles: the
/// job losing most by not taking its best slot goes first, priorities always dominate. Also
/// used to re-insert jobs removed by the perturbation phase.
pub fn recreate(input: &Input, ctx: &mut SolutionContext, lambda: f64, regret_rank: usize) {
    // per job per vehicle cached best insertions, recomputed only for touched vehicles
    let mut cache: Vec<Option<Vec<Option<(Cost, Insertion)>>>> = vec![None; input.jobs.len()];

    loop {
        let mut picked: Option<(u32, f64, usize)> = None;

        for &job in ctx.solution.unassigned.iter() {
            if input.jobs[job].kind == JobKind::Delivery {
                continue;
            }

            let options = cache[job].get_or_insert_with(|| {
                (0..input.vehicles.len())
                    .map(|vehicle| best_for_vehicle(input, ctx, vehicle, job))
                    .collect()
            });

            let mut costs: Vec<Cost> = options.iter().flatten().map(|(cost, _)| *cost).collect();
            if costs.is_empty() {
                continue;
            }
            costs.sort_unstable();

            let regret = if costs.len() < regret_rank {
                SCARCE_REGRET - costs[0]
            } else {
                costs[regret_rank - 1] - costs[0]
            };
            let score = regret as f64 + lambda * spread_cost(input, job) as f64;
            let priority = input.jobs[job].priority;

            let better = match picked {
                None => true,
                Some((best_priority, best_score, best_job)) => {
                    (priority, score, std::cmp::Reverse(input.jobs[job].id))
                        .partial_cmp(&(best_priority, best_score, std::cmp::Reverse(input.jobs[best_job].id)))
                        .map_or(false, |ord| ord == std::cmp::Ordering::Greater)
                }
            };
            if better {
                picked = Some((priority, score, job));
            }
        }

        let Some((_, _, job)) = picked else {
            break;
        };

        let options = cache[job].as_ref().expect("scored above");
        let (vehicle, insertion) = options
            .iter()
            .enumerate()
            .filter_map(|(vehicle, slot)| slot.as_ref().map(|(cost, insertion)| (*cost, vehicle, *insertion)))
            .min_by_key(|&(cost, vehicle, _)| (cost, vehicle))
            .map(|(_, vehicle, insertion)| (vehicle, insertion))
            .expect("scored above");

        apply_insertion(input, ctx, vehicle, insertion, job);

        // only the touched vehicle's slots went stale
        refresh_vehicle(input, ctx, &mut cache, vehicle);
    }
}

/// Fills vehicles one by one: for the current vehicle keep inserting the best scoring job until
/// nothing fits, then move on.
fn sequential_fill(input: &Input, ctx: &mut SolutionContext, lambda: f64) {
    for vehicle in 0..input.vehicles.len() {
        loop {
            let mut picked: Option<(u32, f64, usize, Insertion)> = None;

            for &job in ctx.solution.unassigned.iter() {
                if input.jobs[job].kind == JobKind::Delivery {
                    continue;
                }
                let Some((cost, insertion)) = best_for_vehicle(input, ctx, vehicle, job) else {
                    continue;
                };

                let score = cost as f64 - lambda * spread_cost(input, job) as f64;
                let priority = input.jobs[job].priority;

                let better = match &picked {
                    None => true,
                    Some((best_priority, best_score, best_job, _)) => {
                        (
                            std::cmp::Reverse(priority),
                            score,
                            input.jobs[job].id,
                        )
                            .partial_cmp(&(std::cmp::Reverse(*best_priority), *best_score, input.jobs[*best_job].id))
                            .map_or(false, |ord| ord == std::cmp::Ordering::Less)
                    }
                };
                if better {
                    picked = Some((priority, score, job, insertion));
                }
            }

            let Some((_, _, job, insertion)) = picked else {
                break;
            };
            apply_insertion(input, ctx, vehicle, insertion, job);
        }
    }
}

/// Applies an evaluated insertion to the context.
pub(crate) fn apply_insertion(
    input: &Input,
    ctx: &mut SolutionContext,
    vehicle: usize,
    insertion: Insertion,
    job: usize,
) {
    match insertion.position {
        InsertionPosition::Single { rank } => ctx.insert(input, vehicle, rank, job),
        InsertionPosition::Pair { pickup_rank, delivery_rank } => {
            ctx.insert_pair(input, vehicle, pickup_rank, delivery_rank, job)
        }
    }
}

fn best_for_vehicle(
    input: &Input,
    ctx: &SolutionContext,
    vehicle: usize,
    job: usize,
) -> Option<(Cost, Insertion)> {
    let route = &ctx.solution.routes[vehicle];
    let state = &ctx.states[vehicle];

    evaluate_job_insertion(input, route, state, job).map(|insertion| {
        // activating an unused vehicle is part of the price
        let activation = if route.is_empty() { input.vehicles[vehicle].costs.fixed } else { 0 };
        (insertion.delta.cost + activation, insertion)
    })
}

fn refresh_vehicle(
    input: &Input,
    ctx: &SolutionContext,
    cache: &mut [Option<Vec<Option<(Cost, Insertion)>>>],
    vehicle: usize,
) {
    for (job, options) in cache.iter_mut().enumerate() {
        if let Some(options) = options.as_mut() {
            options[vehicle] = if ctx.solution.unassigned.contains(&job) {
                best_for_vehicle(input, ctx, vehicle, job)
            } else {
                None
            };
        }
    }
}

/// How far the job sits from the fleet: the cheapest travel from any vehicle's first location.
/// Used by λ to favor spreading towards far jobs early.
fn spread_cost(input: &Input, job: usize) -> Cost {
    let location = input.jobs[job].location;
    input
        .vehicles
        .iter()
        .enumerate()
        .filter_map(|(index, vehicle)| {
            vehicle.first_location().map(|first| input.cost(index, first, location))
        })
        .min()
        .unwrap_or(0)
}
