//! The solver: objective, neighborhood operators and the search driver running parallel,
//! independent, deterministic local search runs.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

use crate::construction::{build_initial_solution, create_base_context, HeuristicVariant, SEEDS};
use crate::models::solution::Solution;
use crate::models::Input;
use crate::utils::{parallel_into_collect, DefaultRandom, Environment};
use crate::Error;
use std::sync::Arc;

mod objective;
pub use self::objective::Indicators;

pub mod search;

/// All solver tunables. No global mutable state exists: every run reads this record and the
/// shared immutable input.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Amount of construction seeds: each runs once sequentially and once in parallel mode.
    pub heuristics_count: usize,
    /// Amount of ruin and recreate rounds after the first local search fixpoint.
    pub perturbation_passes: usize,
    /// An optional cap on applied moves per run.
    pub exploration_budget: Option<usize>,
    /// Worker pool size for the independent runs.
    pub thread_count: usize,
    /// When set, perturbation randomness is seeded from the run index so that identical inputs
    /// reproduce identical output byte for byte.
    pub deterministic: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            heuristics_count: 4,
            perturbation_passes: 2,
            exploration_budget: None,
            thread_count: crate::utils::get_cpus(),
            deterministic: true,
        }
    }
}

/// Solves the problem: builds initial solutions from every seed and improves each with the
/// local search, in parallel, then keeps the best under the lexicographic objective. An empty
/// solution with every job unassigned is a legitimate result, never an error.
pub fn solve(input: &Arc<Input>, config: &SolverConfig, environment: &Environment) -> Result<Solution, Error> {
    let base = create_base_context(input)?;

    let seeds = &SEEDS[..config.heuristics_count.clamp(1, SEEDS.len())];
    let runs: Vec<_> = seeds
        .iter()
        .flat_map(|&(lambda, regret_rank)| {
            [HeuristicVariant::Sequential, HeuristicVariant::Parallel]
                .into_iter()
                .map(move |variant| (variant, lambda, regret_rank))
        })
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.max(1))
        .build()
        .map_err(|err| Error::Internal(format!("cannot build worker pool: {err}")))?;

    let results = pool.install(|| {
        parallel_into_collect(runs.into_iter().enumerate().collect(), |(index, (variant, lambda, regret_rank))| {
            let mut ctx = build_initial_solution(input, &base, variant, lambda, regret_rank);

            let seed = if config.deterministic { index as u64 } else { rand::random() };
            let random = DefaultRandom::new(seed);

            search::refine(input, &mut ctx, config, environment, &random, lambda, regret_rank);

            let indicators = Indicators::of(input, &ctx);
            (indicators, ctx.solution)
        })
    });

    let (_, solution) = results
        .into_iter()
        .enumerate()
        .map(|(index, (indicators, solution))| ((indicators.key(), index), solution))
        .min_by_key(|(key, _)| *key)
        .ok_or_else(|| Error::Internal("no solver run produced a solution".to_string()))?;

    (environment.logger)("solve finished");

    Ok(solution)
}
