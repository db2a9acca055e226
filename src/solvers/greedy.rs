//! Greedy dispatch construction with priority rules.
//!
//! Builds a resource order from scratch: a ready set starts with the first
//! operation of every job, and each step appends one ready operation to its
//! machine, chosen by the configured priority rule. With a small probability
//! the choice is uniformly random instead, which diversifies the starting
//! points handed to the multistart and tabu layers.
//!
//! # Reference
//!
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling".

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::encoding::{ResourceOrder, Schedule};
use crate::instance::{Instance, Task};

use super::Solver;

/// Priority rules for selecting the next operation from the ready set.
///
/// Ties are broken by first-encountered order in the ready set, which makes
/// a seeded run fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Shortest processing time.
    Spt,
    /// Longest remaining processing time of the operation's job.
    Lrpt,
    /// Earliest feasible start, ties broken by shortest processing time.
    EstSpt,
    /// Earliest feasible start, ties broken by longest remaining time.
    EstLrpt,
}

impl Priority {
    /// Parses a registry rule name (`spt`, `lrpt`, `est_spt`, `est_lrpt`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "spt" => Some(Self::Spt),
            "lrpt" => Some(Self::Lrpt),
            "est_spt" => Some(Self::EstSpt),
            "est_lrpt" => Some(Self::EstLrpt),
            _ => None,
        }
    }

    /// Index of the operation the rule selects from `ready`.
    fn select(
        &self,
        ready: &[Task],
        instance: &Instance,
        remaining: &[u32],
        job_release: &[u32],
        machine_release: &[u32],
    ) -> usize {
        match self {
            Self::Spt => argmin_by(&indices(ready), |&i| instance.duration_of(ready[i])),
            Self::Lrpt => argmax_by(&indices(ready), |&i| remaining[ready[i].job]),
            Self::EstSpt => {
                let candidates =
                    earliest_start(ready, instance, job_release, machine_release);
                argmin_by(&candidates, |&i| instance.duration_of(ready[i]))
            }
            Self::EstLrpt => {
                let candidates =
                    earliest_start(ready, instance, job_release, machine_release);
                argmax_by(&candidates, |&i| remaining[ready[i].job])
            }
        }
    }
}

/// The indices of `ready` whose operations can start earliest
/// (minimum `max(job release, machine release)`), in encounter order.
fn earliest_start(
    ready: &[Task],
    instance: &Instance,
    job_release: &[u32],
    machine_release: &[u32],
) -> Vec<usize> {
    let mut best = u32::MAX;
    let mut candidates = Vec::new();
    for (i, &task) in ready.iter().enumerate() {
        let est = job_release[task.job].max(machine_release[instance.machine_of(task)]);
        if est < best {
            best = est;
            candidates.clear();
            candidates.push(i);
        } else if est == best {
            candidates.push(i);
        }
    }
    candidates
}

fn indices(ready: &[Task]) -> Vec<usize> {
    (0..ready.len()).collect()
}

/// First index among `candidates` with the strictly smallest key.
fn argmin_by<K: Ord>(candidates: &[usize], key: impl Fn(&usize) -> K) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if key(&i) < key(&best) {
            best = i;
        }
    }
    best
}

/// First index among `candidates` with the strictly largest key.
fn argmax_by<K: Ord>(candidates: &[usize], key: impl Fn(&usize) -> K) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if key(&i) > key(&best) {
            best = i;
        }
    }
    best
}

/// Configuration for [`GreedySolver`].
#[derive(Debug, Clone)]
pub struct GreedyConfig {
    /// Priority rule used for the non-exploratory steps.
    pub priority: Priority,
    /// Probability of picking a uniformly random ready operation instead of
    /// following the rule.
    pub epsilon: f64,
    /// Random seed (`None` for a random seed).
    pub seed: Option<u64>,
}

impl GreedyConfig {
    /// Creates a configuration for the given rule with the default
    /// exploration rate (0.05) and a random seed.
    pub fn new(priority: Priority) -> Self {
        Self {
            priority,
            epsilon: 0.05,
            seed: None,
        }
    }

    /// Sets the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Priority-rule dispatch solver.
///
/// The RNG is created once from the configured seed and advances across
/// `solve` calls, so repeated invocations (multistart) explore different
/// constructions while the whole sequence stays reproducible for a given
/// seed.
#[derive(Debug)]
pub struct GreedySolver {
    config: GreedyConfig,
    rng: RefCell<StdRng>,
}

impl GreedySolver {
    /// Creates a solver from a full configuration.
    pub fn new(config: GreedyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            config,
            rng: RefCell::new(rng),
        }
    }

    /// Creates a solver for `priority` with default configuration.
    pub fn with_priority(priority: Priority) -> Self {
        Self::new(GreedyConfig::new(priority))
    }
}

impl Solver for GreedySolver {
    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule> {
        let mut order = ResourceOrder::new(Arc::clone(instance));
        let mut rng = self.rng.borrow_mut();

        let mut ready: Vec<Task> = (0..instance.num_jobs()).map(|j| Task::new(j, 0)).collect();
        let mut remaining: Vec<u32> = (0..instance.num_jobs())
            .map(|j| instance.total_duration(j))
            .collect();
        let mut job_release = vec![0u32; instance.num_jobs()];
        let mut machine_release = vec![0u32; instance.num_machines()];

        while !ready.is_empty() {
            if Instant::now() >= deadline {
                // incomplete order: no answer in budget
                return None;
            }
            let idx = if rng.random::<f64>() < self.config.epsilon {
                rng.random_range(0..ready.len())
            } else {
                self.config.priority.select(
                    &ready,
                    instance,
                    &remaining,
                    &job_release,
                    &machine_release,
                )
            };
            let task = ready.remove(idx);
            let machine = instance.machine_of(task);
            order.append(machine, task);

            if task.task + 1 < instance.num_tasks() {
                ready.push(Task::new(task.job, task.task + 1));
            }
            remaining[task.job] -= instance.duration_of(task);
            let end = job_release[task.job].max(machine_release[machine])
                + instance.duration_of(task);
            job_release[task.job] = end;
            machine_release[machine] = end;
        }
        order.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// 2 jobs x 3 machines:
    /// job0 = [(m0,3),(m1,3),(m2,2)], job1 = [(m0,2),(m2,2),(m1,4)].
    fn sample_instance() -> Arc<Instance> {
        Arc::new(Instance::new(
            2,
            3,
            &[
                vec![(0, 3), (1, 3), (2, 2)],
                vec![(0, 2), (2, 2), (1, 4)],
            ],
        ))
    }

    fn deterministic(priority: Priority) -> GreedySolver {
        GreedySolver::new(GreedyConfig::new(priority).with_epsilon(0.0).with_seed(0))
    }

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[test]
    fn test_spt_dispatch() {
        let schedule = deterministic(Priority::Spt)
            .solve(&sample_instance(), far_deadline())
            .unwrap();
        assert!(schedule.is_valid());
        // SPT picks j1t0 (2), j1t1 (2), j0t0 (3), j0t1 (3), j1t2, j0t2.
        assert_eq!(schedule.makespan(), 12);
    }

    #[test]
    fn test_lrpt_dispatch() {
        let schedule = deterministic(Priority::Lrpt)
            .solve(&sample_instance(), far_deadline())
            .unwrap();
        assert!(schedule.is_valid());
        // LRPT alternates jobs, keeping remaining work balanced.
        assert_eq!(schedule.makespan(), 11);
    }

    #[test]
    fn test_est_spt_dispatch() {
        let schedule = deterministic(Priority::EstSpt)
            .solve(&sample_instance(), far_deadline())
            .unwrap();
        assert!(schedule.is_valid());
        assert_eq!(schedule.makespan(), 13);
    }

    #[test]
    fn test_est_lrpt_dispatch() {
        let schedule = deterministic(Priority::EstLrpt)
            .solve(&sample_instance(), far_deadline())
            .unwrap();
        assert!(schedule.is_valid());
        assert_eq!(schedule.makespan(), 11);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = GreedyConfig::new(Priority::Spt).with_epsilon(1.0).with_seed(7);
        let a = GreedySolver::new(config.clone())
            .solve(&sample_instance(), far_deadline())
            .unwrap();
        let b = GreedySolver::new(config)
            .solve(&sample_instance(), far_deadline())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_exploration_still_yields_valid_schedules() {
        let solver =
            GreedySolver::new(GreedyConfig::new(Priority::Lrpt).with_epsilon(1.0).with_seed(3));
        for _ in 0..10 {
            let schedule = solver.solve(&sample_instance(), far_deadline()).unwrap();
            assert!(schedule.is_valid());
        }
    }

    #[test]
    fn test_expired_deadline_returns_none() {
        let solver = deterministic(Priority::Spt);
        let past = Instant::now() - Duration::from_millis(1);
        assert!(solver.solve(&sample_instance(), past).is_none());
    }

    #[test]
    fn test_priority_from_name() {
        assert_eq!(Priority::from_name("spt"), Some(Priority::Spt));
        assert_eq!(Priority::from_name("est_lrpt"), Some(Priority::EstLrpt));
        assert_eq!(Priority::from_name("edd"), None);
    }
}
