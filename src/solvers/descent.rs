//! Multistart steepest-descent local search.

use std::sync::Arc;
use std::time::Instant;

use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::Instance;
use crate::neighborhood::Neighborhood;

use super::Solver;

/// Configuration for [`DescentSolver`].
#[derive(Debug, Clone)]
pub struct DescentConfig {
    /// Number of independent restarts; each re-invokes the base solver and
    /// descends from its result. All restarts share one deadline.
    pub restarts: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self { restarts: 5 }
    }
}

impl DescentConfig {
    /// Sets the restart count.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }
}

/// Steepest-descent local search over a neighborhood.
///
/// One run starts from the base solver's schedule and repeatedly adopts the
/// best strictly-improving feasible neighbor until none exists
/// (best-improvement descent, not first-improvement). The final result is
/// the best schedule over all restarts.
pub struct DescentSolver<N: Neighborhood> {
    neighborhood: N,
    base: Box<dyn Solver>,
    config: DescentConfig,
}

impl<N: Neighborhood> DescentSolver<N> {
    /// Creates a descent solver with the default restart count.
    pub fn new(neighborhood: N, base: Box<dyn Solver>) -> Self {
        Self {
            neighborhood,
            base,
            config: DescentConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: DescentConfig) -> Self {
        self.config = config;
        self
    }

    /// Descends from `start` until no neighbor improves or the deadline
    /// passes. The returned makespan never exceeds `start`'s.
    fn descend(&self, start: Schedule, deadline: Instant) -> Schedule {
        let mut current = start;
        while Instant::now() < deadline {
            let order = ResourceOrder::from_schedule(&current);
            let mut best_makespan = current.makespan();
            let mut improved = None;
            for neighbor in self.neighborhood.generate_neighbors(&order) {
                // infeasible candidates are simply discarded
                if let Some(candidate) = neighbor.decode() {
                    if candidate.makespan() < best_makespan {
                        best_makespan = candidate.makespan();
                        improved = Some(candidate);
                    }
                }
            }
            match improved {
                Some(schedule) => current = schedule,
                None => break,
            }
        }
        current
    }
}

impl<N: Neighborhood> Solver for DescentSolver<N> {
    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule> {
        let mut best: Option<Schedule> = None;
        for _ in 0..self.config.restarts {
            if Instant::now() >= deadline {
                break;
            }
            let Some(start) = self.base.solve(instance, deadline) else {
                continue;
            };
            let result = self.descend(start, deadline);
            if best
                .as_ref()
                .is_none_or(|b| result.makespan() < b.makespan())
            {
                best = Some(result);
            }
        }
        best
    }
}
