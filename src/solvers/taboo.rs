//! Tabu search over the Nowicki-Smutnicki swap moves.
//!
//! Steepest-descent variant that keeps moving even when no neighbor
//! improves: the best admissible swap is adopted each iteration, and the
//! reversal of recent moves is forbidden by a short-term memory (the tabu
//! list) so the search cannot fall straight back into the local optimum it
//! just left. A tabu swap is still admissible when it beats the best
//! makespan seen so far (aspiration criterion).
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Nowicki, E. & Smutnicki, C. (1996). "A Fast Taboo Search Algorithm for
//!   the Job Shop Problem", *Management Science* 42(6), 797-813.

use std::sync::Arc;
use std::time::Instant;

use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::Instance;
use crate::neighborhood::{Nowicki, Swap};

use super::Solver;

/// Fixed-capacity ring buffer of the most recently accepted swaps.
///
/// Holds at most `capacity` entries; remembering one more overwrites the
/// oldest. Membership is structural equality on [`Swap`].
#[derive(Debug, Clone)]
pub struct TabuList {
    entries: Vec<Option<Swap>>,
    next: usize,
}

impl TabuList {
    /// Creates an empty list holding up to `capacity` swaps.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "tabu list capacity must be positive");
        Self {
            entries: vec![None; capacity],
            next: 0,
        }
    }

    /// Maximum number of remembered swaps.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Records a swap, evicting the oldest entry once full.
    pub fn remember(&mut self, swap: Swap) {
        self.entries[self.next] = Some(swap);
        self.next = (self.next + 1) % self.entries.len();
    }

    /// Whether `swap` is currently forbidden.
    pub fn contains(&self, swap: &Swap) -> bool {
        self.entries.iter().any(|entry| entry.as_ref() == Some(swap))
    }
}

/// Configuration for [`TabooSolver`].
#[derive(Debug, Clone)]
pub struct TabooConfig {
    /// Tabu list capacity: how many accepted swaps stay forbidden.
    pub capacity: usize,
}

impl Default for TabooConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

impl TabooConfig {
    /// Sets the tabu list capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Tabu search solver.
///
/// Works on the swap moves directly (rather than the anonymous neighbor
/// orders) because the tabu list needs the structural identity of each move.
pub struct TabooSolver {
    neighborhood: Nowicki,
    base: Box<dyn Solver>,
    config: TabooConfig,
}

impl TabooSolver {
    /// Creates a tabu solver with the default list capacity.
    pub fn new(neighborhood: Nowicki, base: Box<dyn Solver>) -> Self {
        Self {
            neighborhood,
            base,
            config: TabooConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: TabooConfig) -> Self {
        self.config = config;
        self
    }
}

impl Solver for TabooSolver {
    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule> {
        let mut current = self.base.solve(instance, deadline)?;
        let mut best = current.clone();
        let mut tabu = TabuList::new(self.config.capacity);

        while Instant::now() < deadline {
            let order = ResourceOrder::from_schedule(&current);
            let best_makespan = best.makespan();

            let mut winner: Option<(Swap, Schedule)> = None;
            for swap in self.neighborhood.all_swaps(&order) {
                let Some(candidate) = swap.apply(&order).decode() else {
                    continue;
                };
                let makespan = candidate.makespan();
                // tabu swaps compete only under the aspiration criterion
                if tabu.contains(&swap) && makespan >= best_makespan {
                    continue;
                }
                if winner
                    .as_ref()
                    .is_none_or(|(_, w)| makespan < w.makespan())
                {
                    winner = Some((swap, candidate));
                }
            }

            // no admissible neighbor at all: the search is blocked
            let Some((swap, candidate)) = winner else {
                break;
            };
            current = candidate;
            if current.makespan() < best.makespan() {
                best = current.clone();
            }
            tabu.remember(swap);
        }
        Some(best)
    }
}
