//! Neighborhoods over the resource-order encoding.
//!
//! A neighborhood turns one candidate order into a set of nearby candidate
//! orders. The local-search solvers (descent, tabu) are parameterized over
//! the [`Neighborhood`] trait; the one implementation provided is the
//! Nowicki-Smutnicki block neighborhood over the critical path.
//!
//! # References
//!
//! - Nowicki, E. & Smutnicki, C. (1996). "A Fast Taboo Search Algorithm for
//!   the Job Shop Problem", *Management Science* 42(6), 797-813.

mod nowicki;

pub use nowicki::{Block, Nowicki, Swap};

use crate::encoding::ResourceOrder;

/// Generates candidate solutions in the vicinity of a current solution.
pub trait Neighborhood {
    /// Returns the neighbors of `current`.
    ///
    /// Every returned order is a fresh copy; `current` is never mutated.
    /// Neighbors are not guaranteed to be feasible: callers must decode
    /// each candidate and discard the ones that fail.
    fn generate_neighbors(&self, current: &ResourceOrder) -> Vec<ResourceOrder>;
}
