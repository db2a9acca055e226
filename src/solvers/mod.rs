//! Solver strategies.
//!
//! Every strategy implements the single-capability [`Solver`] trait:
//! `solve(instance, deadline) -> Option<Schedule>`. Three families are
//! provided, each usable on its own or stacked:
//!
//! - [`GreedySolver`]: from-scratch construction by priority-rule dispatch
//!   with a small exploration rate.
//! - [`DescentSolver`]: multistart steepest-descent local search over a
//!   neighborhood, seeded by a base solver.
//! - [`TabooSolver`]: tabu search over the Nowicki-Smutnicki swaps, with a
//!   fixed-capacity tabu list and aspiration override.
//!
//! [`solver_for_name`] maps registry names (`spt`, `desc_lrpt`,
//! `taboo_est_spt`, ...) to ready-to-use boxed solvers.

mod basic;
mod descent;
mod greedy;
mod registry;
mod taboo;

pub use basic::BasicSolver;
pub use descent::{DescentConfig, DescentSolver};
pub use greedy::{GreedyConfig, GreedySolver, Priority};
pub use registry::{solver_for_name, UnknownSolver};
pub use taboo::{TabooConfig, TabooSolver, TabuList};

use std::sync::Arc;
use std::time::Instant;

use crate::encoding::Schedule;
use crate::instance::Instance;

/// A solving strategy for the job-shop problem.
pub trait Solver {
    /// Searches for a low-makespan schedule until blocked or `deadline`
    /// passes.
    ///
    /// `deadline` is an absolute point in time; solvers compare it against
    /// `Instant::now()` at loop boundaries only, so a single decode or
    /// neighborhood evaluation may overrun it. Returns `None` when no
    /// feasible solution was assembled within the budget.
    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule>;
}
