//! Decoded schedules: start times, makespan, validity, critical path.

use std::fmt;
use std::sync::Arc;

use crate::instance::{Instance, Task};

/// A complete schedule: an absolute start time for every operation.
///
/// Schedules are produced by [`crate::encoding::ResourceOrder::decode`] and
/// are immutable afterwards. Completion of an operation is
/// `start + duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    instance: Arc<Instance>,
    /// Flat row-major table, indexed by `job * num_tasks + task`.
    start_times: Vec<u32>,
}

impl Schedule {
    /// Creates a schedule from a full start-time table.
    ///
    /// The table must hold `num_jobs * num_tasks` entries in row-major order.
    pub fn new(instance: Arc<Instance>, start_times: Vec<u32>) -> Self {
        debug_assert_eq!(
            start_times.len(),
            instance.num_jobs() * instance.num_tasks()
        );
        Self {
            instance,
            start_times,
        }
    }

    /// The instance this schedule belongs to.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Start time of operation `task` of `job`.
    pub fn start_time(&self, job: usize, task: usize) -> u32 {
        self.start_times[job * self.instance.num_tasks() + task]
    }

    /// Start time of `task`.
    pub fn start_of(&self, task: Task) -> u32 {
        self.start_time(task.job, task.task)
    }

    /// Completion time of operation `task` of `job`.
    pub fn end_time(&self, job: usize, task: usize) -> u32 {
        self.start_time(job, task) + self.instance.duration(job, task)
    }

    /// Completion time of `task`.
    pub fn end_of(&self, task: Task) -> u32 {
        self.end_time(task.job, task.task)
    }

    /// Completion time of the last-finishing operation.
    pub fn makespan(&self) -> u32 {
        self.all_tasks().map(|t| self.end_of(t)).max().unwrap_or(0)
    }

    /// Checks job precedence and machine exclusivity.
    ///
    /// A schedule is valid iff every operation starts no earlier than its
    /// job predecessor finishes, and no two operations sharing a machine
    /// overlap in time.
    pub fn is_valid(&self) -> bool {
        let instance = &self.instance;
        for job in 0..instance.num_jobs() {
            for task in 1..instance.num_tasks() {
                if self.start_time(job, task) < self.end_time(job, task - 1) {
                    return false;
                }
            }
        }
        for machine in 0..instance.num_machines() {
            let mut intervals: Vec<(u32, u32)> = (0..instance.num_jobs())
                .map(|job| {
                    let task = instance.task_with_machine(job, machine);
                    (self.start_time(job, task), self.end_time(job, task))
                })
                .collect();
            intervals.sort_unstable();
            if intervals.windows(2).any(|w| w[0].1 > w[1].0) {
                return false;
            }
        }
        true
    }

    /// Extracts the critical path: the tight precedence chain whose total
    /// duration equals the makespan.
    ///
    /// Walks backward from the operation finishing at the makespan. At each
    /// step the machine-predecessor edge is taken when it is tight
    /// (predecessor completion equals current start), falling back to the
    /// job-predecessor edge, until an operation without a tight predecessor
    /// is reached. All lookups scan jobs in ascending index, which makes the
    /// extracted chain deterministic when several longest chains exist.
    pub fn critical_path(&self) -> Vec<Task> {
        let makespan = self.makespan();
        let mut current = self
            .all_tasks()
            .find(|&t| self.end_of(t) == makespan)
            .expect("some operation finishes at the makespan");

        let mut chain = vec![current];
        loop {
            let start = self.start_of(current);
            if let Some(pred) = self.machine_predecessor(current, start) {
                current = pred;
            } else if current.task > 0
                && self.end_time(current.job, current.task - 1) == start
            {
                current = Task::new(current.job, current.task - 1);
            } else {
                break;
            }
            chain.push(current);
        }
        chain.reverse();
        chain
    }

    /// The operation finishing on `task`'s machine exactly when `task`
    /// starts, if any.
    ///
    /// Only operations that precede `task` in the machine's processing
    /// order qualify, taking `(start, job)` as that order (the tiebreak on
    /// equal starts matters for zero-duration operations, where any
    /// same-end candidate would otherwise send the backward walk in
    /// circles).
    fn machine_predecessor(&self, task: Task, start: u32) -> Option<Task> {
        let machine = self.instance.machine_of(task);
        (0..self.instance.num_jobs())
            .filter(|&job| job != task.job)
            .map(|job| Task::new(job, self.instance.task_with_machine(job, machine)))
            .find(|&t| self.end_of(t) == start && (self.start_of(t), t.job) < (start, task.job))
    }

    /// Renders an ASCII Gantt chart, one row per machine.
    ///
    /// Each operation is drawn as a run of its job index (modulo 10); idle
    /// time is drawn as dots.
    pub fn gantt(&self) -> String {
        let instance = &self.instance;
        let horizon = self.makespan() as usize;
        let mut out = String::new();
        for machine in 0..instance.num_machines() {
            let mut row = vec!['.'; horizon];
            for job in 0..instance.num_jobs() {
                let task = instance.task_with_machine(job, machine);
                let start = self.start_time(job, task) as usize;
                let end = self.end_time(job, task) as usize;
                let mark = char::from_digit((job % 10) as u32, 10).unwrap_or('?');
                for cell in &mut row[start..end] {
                    *cell = mark;
                }
            }
            out.push_str(&format!("m{machine:<2}|"));
            out.extend(row);
            out.push_str("|\n");
        }
        out
    }

    fn all_tasks(&self) -> impl Iterator<Item = Task> + '_ {
        let num_tasks = self.instance.num_tasks();
        (0..self.instance.num_jobs())
            .flat_map(move |job| (0..num_tasks).map(move |task| Task::new(job, task)))
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for job in 0..self.instance.num_jobs() {
            write!(f, "job {job}:")?;
            for task in 0..self.instance.num_tasks() {
                write!(f, " {}", self.start_time(job, task))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 jobs x 2 machines: job0 = [(m0,3),(m1,2)], job1 = [(m1,2),(m0,3)].
    fn tiny_instance() -> Arc<Instance> {
        Arc::new(Instance::new(
            2,
            2,
            &[vec![(0, 3), (1, 2)], vec![(1, 2), (0, 3)]],
        ))
    }

    fn tiny_schedule() -> Schedule {
        // job0: m0 0-3, m1 3-5; job1: m1 0-2, m0 3-6.
        Schedule::new(tiny_instance(), vec![0, 3, 0, 3])
    }

    #[test]
    fn test_makespan_is_last_completion() {
        assert_eq!(tiny_schedule().makespan(), 6);
    }

    #[test]
    fn test_valid_schedule() {
        assert!(tiny_schedule().is_valid());
    }

    #[test]
    fn test_job_precedence_violation_detected() {
        // job1's second operation starts before its first finishes.
        let schedule = Schedule::new(tiny_instance(), vec![0, 3, 0, 1]);
        assert!(!schedule.is_valid());
    }

    #[test]
    fn test_machine_overlap_detected() {
        // both m0 operations start at 0.
        let schedule = Schedule::new(tiny_instance(), vec![0, 3, 0, 0]);
        assert!(!schedule.is_valid());
    }

    #[test]
    fn test_critical_path_tiny() {
        let schedule = tiny_schedule();
        // makespan 6 reached by job1 task1 (3-6); its machine predecessor on
        // m0 is job0 task0 (0-3), which starts at 0.
        let path = schedule.critical_path();
        assert_eq!(path, vec![Task::new(0, 0), Task::new(1, 1)]);
        let total: u32 = path
            .iter()
            .map(|&t| schedule.instance().duration_of(t))
            .sum();
        assert_eq!(total, schedule.makespan());
    }

    #[test]
    fn test_critical_path_prefers_machine_edge() {
        // job0: m0 0-3, m1 3-5; job1: m1 5-7, m0 7-10.
        let instance = tiny_instance();
        let schedule = Schedule::new(instance, vec![0, 3, 5, 7]);
        assert!(schedule.is_valid());
        let path = schedule.critical_path();
        // chain: j0t0 (job edge) j0t1 (machine edge on m1) j1t0 (job edge) j1t1
        assert_eq!(
            path,
            vec![
                Task::new(0, 0),
                Task::new(0, 1),
                Task::new(1, 0),
                Task::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_critical_path_terminates_with_zero_durations() {
        // both jobs open with a zero-duration operation on m0, so all four
        // tight-edge conditions at time 0 coincide; the walk must still
        // follow the machine order instead of bouncing between the two
        // zero-length operations.
        let instance = Arc::new(Instance::new(
            2,
            2,
            &[vec![(0, 0), (1, 1)], vec![(0, 0), (1, 5)]],
        ));
        // m0: j0t0 0-0, j1t0 0-0; m1: j1t1 0-5, j0t1 5-6.
        let schedule = Schedule::new(instance, vec![0, 5, 0, 0]);
        assert!(schedule.is_valid());
        assert_eq!(schedule.makespan(), 6);

        let path = schedule.critical_path();
        assert_eq!(
            path,
            vec![
                Task::new(0, 0),
                Task::new(1, 0),
                Task::new(1, 1),
                Task::new(0, 1)
            ]
        );
        let total: u32 = path
            .iter()
            .map(|&t| schedule.instance().duration_of(t))
            .sum();
        assert_eq!(total, schedule.makespan());
    }

    #[test]
    fn test_gantt_dimensions() {
        let gantt = tiny_schedule().gantt();
        let lines: Vec<&str> = gantt.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("m0"));
        // each row spans the full horizon between the frame bars
        let body = lines[0].split('|').nth(1).unwrap();
        assert_eq!(body.len(), 6);
    }

    #[test]
    fn test_display_lists_start_times() {
        let text = tiny_schedule().to_string();
        assert_eq!(text, "job 0: 0 3\njob 1: 0 3\n");
    }
}
