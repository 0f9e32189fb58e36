//! A core crate to solve rich [`Vehicle Routing Problem`](https://en.wikipedia.org/wiki/Vehicle_routing_problem)
//! variations: heterogeneous fleets with capacities, skills, shift time windows and breaks, single
//! jobs and pickup/delivery shipments with service times, time windows, priorities and
//! multi-dimensional demands.
//!
//! # Key points
//!
//! The solver minimizes a fixed lexicographic objective: amount of unassigned priority-weighted
//! tasks first, then total user cost (fixed + per-hour + per-km), then total travel duration.
//! It builds initial solutions with regret-based insertion heuristics and improves them with a
//! deterministic local search over a family of neighborhood operators. Tractability comes from
//! the per-route state cache: every candidate move's gain and feasibility is decided against
//! precomputed summaries instead of replaying routes.
//!
//! Model definitions are split into three groups:
//!
//! - [`models::common`] contains unit types: durations, costs, time windows, load amounts.
//! - [`models::problem`] contains the problem definition: jobs, vehicles, travel matrices.
//! - [`models::solution`] contains solution models: routes, assignment summaries.
//!
//! The [`construction`] module implements insertion feasibility primitives and the construction
//! heuristics, the [`solver`] module the route state cache, the operator family and the search
//! driver.
//!
//! Json input/output and command line handling live in the sibling `vroom-format` and
//! `vroom-cli` crates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
mod helpers;

pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;

mod error;

pub use crate::error::Error;
