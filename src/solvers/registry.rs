//! Name-to-solver registry.

use thiserror::Error;

use crate::neighborhood::Nowicki;

use super::{
    BasicSolver, DescentSolver, GreedyConfig, GreedySolver, Priority, Solver, TabooSolver,
};

/// Error raised when a solver name is not recognized.
///
/// Raised immediately at lookup time, never deferred into a solve call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown solver: {0}")]
pub struct UnknownSolver(pub String);

/// Resolves a solver name to a ready-to-use solver.
///
/// Recognized names:
///
/// - `basic` — the trivial reference solver;
/// - `spt`, `lrpt`, `est_spt`, `est_lrpt` — greedy dispatch with that rule;
/// - `desc_<rule>` — multistart descent seeded by the corresponding greedy
///   solver;
/// - `taboo_<rule>` — tabu search (default list capacity) seeded by the
///   corresponding greedy solver.
pub fn solver_for_name(name: &str) -> Result<Box<dyn Solver>, UnknownSolver> {
    if name == "basic" {
        return Ok(Box::new(BasicSolver));
    }
    if let Some(priority) = Priority::from_name(name) {
        return Ok(greedy(priority));
    }
    if let Some(rule) = name.strip_prefix("desc_") {
        if let Some(priority) = Priority::from_name(rule) {
            return Ok(Box::new(DescentSolver::new(Nowicki::new(), greedy(priority))));
        }
    }
    if let Some(rule) = name.strip_prefix("taboo_") {
        if let Some(priority) = Priority::from_name(rule) {
            return Ok(Box::new(TabooSolver::new(Nowicki::new(), greedy(priority))));
        }
    }
    Err(UnknownSolver(name.to_string()))
}

fn greedy(priority: Priority) -> Box<dyn Solver> {
    Box::new(GreedySolver::new(GreedyConfig::new(priority)))
}
