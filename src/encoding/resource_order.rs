//! The resource-order encoding and its decoding simulation.

use std::fmt;
use std::sync::Arc;

use crate::instance::{Instance, Task};

use super::schedule::Schedule;

/// A candidate solution: for each machine, the order in which operations
/// pass over it.
///
/// The encoding is value-like: neighbor generation never mutates a base
/// order, it clones it and swaps two positions in the clone. This
/// copy-on-write discipline is what allows many candidates to be evaluated
/// from one base without interference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOrder {
    instance: Arc<Instance>,
    /// `sequences[machine]` lists the operations assigned to that machine,
    /// in processing order. Complete once every sequence holds one
    /// operation per job.
    sequences: Vec<Vec<Task>>,
}

impl ResourceOrder {
    /// Creates an empty order: every machine sequence is empty.
    pub fn new(instance: Arc<Instance>) -> Self {
        let sequences = vec![Vec::with_capacity(instance.num_jobs()); instance.num_machines()];
        Self {
            instance,
            sequences,
        }
    }

    /// Rebuilds the resource order of a decoded schedule.
    ///
    /// For each machine, operations are listed by increasing start time.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let instance = Arc::clone(schedule.instance());
        let mut sequences = Vec::with_capacity(instance.num_machines());
        for machine in 0..instance.num_machines() {
            let mut ops: Vec<Task> = (0..instance.num_jobs())
                .map(|job| Task::new(job, instance.task_with_machine(job, machine)))
                .collect();
            ops.sort_by_key(|&t| schedule.start_of(t));
            sequences.push(ops);
        }
        Self {
            instance,
            sequences,
        }
    }

    /// The instance this order belongs to.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Appends `task` to `machine`'s sequence.
    ///
    /// Construction contract: each operation is appended exactly once, after
    /// its job predecessor. Violations are not checked here beyond capacity;
    /// a contradictory order simply fails to decode.
    pub fn append(&mut self, machine: usize, task: Task) {
        debug_assert!(self.sequences[machine].len() < self.instance.num_jobs());
        debug_assert_eq!(self.instance.machine_of(task), machine);
        self.sequences[machine].push(task);
    }

    /// Exchanges the entries at `p1` and `p2` of `machine`'s sequence.
    pub fn swap(&mut self, machine: usize, p1: usize, p2: usize) {
        self.sequences[machine].swap(p1, p2);
    }

    /// The operation at position `pos` of `machine`'s sequence.
    pub fn task_at(&self, machine: usize, pos: usize) -> Task {
        self.sequences[machine][pos]
    }

    /// The full sequence of `machine`.
    pub fn sequence(&self, machine: usize) -> &[Task] {
        &self.sequences[machine]
    }

    /// Simulates the order into a [`Schedule`], or returns `None` when the
    /// machine sequences deadlock against job precedence.
    ///
    /// Per job, the completion time of its last scheduled operation is
    /// tracked; per machine, a cursor into its sequence plus its last
    /// completion time. Each pass schedules the next queued operation of
    /// every machine whose job predecessor has completed, at
    /// `max(job release, machine release)`. A pass that schedules nothing
    /// while operations remain means the order cycles between machine order
    /// and job order: no schedule exists.
    ///
    /// Decoding is deterministic: a given order always yields the same
    /// start times and the same feasibility verdict.
    pub fn decode(&self) -> Option<Schedule> {
        let instance = &self.instance;
        let total = instance.num_jobs() * instance.num_tasks();
        if self.sequences.iter().map(Vec::len).sum::<usize>() != total {
            return None;
        }

        let mut start_times = vec![0u32; total];
        // next operation index each job is waiting to run
        let mut job_progress = vec![0usize; instance.num_jobs()];
        let mut job_release = vec![0u32; instance.num_jobs()];
        let mut cursor = vec![0usize; instance.num_machines()];
        let mut machine_release = vec![0u32; instance.num_machines()];
        let mut scheduled = 0usize;

        while scheduled < total {
            let mut advanced = false;
            for machine in 0..instance.num_machines() {
                let Some(&task) = self.sequences[machine].get(cursor[machine]) else {
                    continue;
                };
                if job_progress[task.job] != task.task {
                    continue;
                }
                let start = job_release[task.job].max(machine_release[machine]);
                let end = start + instance.duration_of(task);
                start_times[task.job * instance.num_tasks() + task.task] = start;
                job_release[task.job] = end;
                machine_release[machine] = end;
                job_progress[task.job] += 1;
                cursor[machine] += 1;
                scheduled += 1;
                advanced = true;
            }
            if !advanced {
                return None;
            }
        }
        Some(Schedule::new(Arc::clone(instance), start_times))
    }
}

impl fmt::Display for ResourceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (machine, sequence) in self.sequences.iter().enumerate() {
            write!(f, "machine {machine}:")?;
            for task in sequence {
                write!(f, " {task}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
