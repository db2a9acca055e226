//! Trivial reference solver.

use std::sync::Arc;
use std::time::Instant;

use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::{Instance, Task};

use super::Solver;

/// Baseline solver: every machine processes operations in task-index-major
/// order (all first operations by job index, then all second operations,
/// and so on).
///
/// The resulting order is feasible by construction but usually far from
/// optimal; it exists as a deterministic reference point for tests and
/// comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSolver;

impl Solver for BasicSolver {
    fn solve(&self, instance: &Arc<Instance>, _deadline: Instant) -> Option<Schedule> {
        let mut order = ResourceOrder::new(Arc::clone(instance));
        for task in 0..instance.num_tasks() {
            for job in 0..instance.num_jobs() {
                let t = Task::new(job, task);
                order.append(instance.machine_of(t), t);
            }
        }
        order.decode()
    }
}
