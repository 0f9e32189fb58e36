//! Construction heuristics together with the insertion feasibility primitives and the route
//! state cache they share with the local search.

mod state;
pub use self::state::RouteState;
pub use self::state::SolutionContext;
pub(crate) use self::state::capacity_ok;

mod evaluators;
pub use self::evaluators::evaluate_job_insertion;
pub use self::evaluators::evaluate_pair_insertion;
pub use self::evaluators::evaluate_single_insertion;
pub use self::evaluators::limits_ok;
pub use self::evaluators::location_before;
pub use self::evaluators::location_from;
pub use self::evaluators::removal_delta;
pub use self::evaluators::single_delta;
pub use self::evaluators::Insertion;
pub use self::evaluators::InsertionPosition;

mod insertions;
pub use self::insertions::build_initial_solution;
pub use self::insertions::create_base_context;
pub use self::insertions::recreate;
pub use self::insertions::HeuristicVariant;
pub(crate) use self::insertions::apply_insertion;
pub(crate) use self::insertions::SEEDS;
