//! Problem description for the classic job-shop scheduling problem (JSP).
//!
//! An [`Instance`] is an immutable table of `num_jobs x num_tasks` operations.
//! Each job is a fixed sequence of operations; operation `k` of a job must
//! start no earlier than operation `k-1` of the same job finishes, and each
//! operation occupies one machine for a fixed duration. In the classic JSP
//! every job visits every machine exactly once, so `num_tasks == num_machines`.
//!
//! # Text format
//!
//! [`Instance::parse`] reads the standard academic format: any number of
//! comment lines starting with `#`, a header `num_jobs num_machines`, then
//! one line per job holding `num_machines` pairs of `machine duration`.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// One operation of a job, identified by `(job, task)`.
///
/// Identity is value-based: two tasks are equal iff both fields match.
/// The implicit precedence `(job, k-1) -> (job, k)` is not stored; it is
/// derived from the indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Index of the job this operation belongs to.
    pub job: usize,
    /// Position of this operation within its job.
    pub task: usize,
}

impl Task {
    /// Creates a new task identifier.
    pub fn new(job: usize, task: usize) -> Self {
        Self { job, task }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.job, self.task)
    }
}

/// Error raised when parsing an instance from its textual format.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Underlying I/O failure when reading from a file.
    #[error("failed to read instance file: {0}")]
    Io(#[from] std::io::Error),

    /// A number was expected but the input ended.
    #[error("unexpected end of input (expected {expected})")]
    UnexpectedEof {
        /// Description of the missing value.
        expected: &'static str,
    },

    /// A token could not be parsed as a number.
    #[error("invalid token {token:?} (expected {expected})")]
    InvalidToken {
        /// The offending token.
        token: String,
        /// Description of the expected value.
        expected: &'static str,
    },

    /// Input continued after the last job line.
    #[error("trailing input after the last job line, starting at {token:?}")]
    TrailingInput {
        /// The first unexpected token.
        token: String,
    },
}

/// An immutable job-shop problem instance.
///
/// Operation data is stored in two flat row-major tables indexed by
/// `job * num_tasks + task`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    num_jobs: usize,
    num_machines: usize,
    durations: Vec<u32>,
    machines: Vec<usize>,
}

impl Instance {
    /// Builds an instance from per-job operation lists.
    ///
    /// `ops[job][task]` is the `(machine, duration)` pair of that operation.
    /// Every job must have exactly `num_machines` operations.
    pub fn new(num_jobs: usize, num_machines: usize, ops: &[Vec<(usize, u32)>]) -> Self {
        debug_assert_eq!(ops.len(), num_jobs);
        let mut durations = Vec::with_capacity(num_jobs * num_machines);
        let mut machines = Vec::with_capacity(num_jobs * num_machines);
        for job_ops in ops {
            debug_assert_eq!(job_ops.len(), num_machines);
            for &(machine, duration) in job_ops {
                debug_assert!(machine < num_machines);
                machines.push(machine);
                durations.push(duration);
            }
        }
        Self {
            num_jobs,
            num_machines,
            durations,
            machines,
        }
    }

    /// Parses an instance from the standard textual format.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut tokens = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace);

        let num_jobs = next_number(&mut tokens, "job count")?;
        let num_machines = next_number(&mut tokens, "machine count")?;

        let mut ops = Vec::with_capacity(num_jobs);
        for _ in 0..num_jobs {
            let mut job_ops = Vec::with_capacity(num_machines);
            for _ in 0..num_machines {
                let machine = next_number(&mut tokens, "machine index")?;
                let duration = next_number::<u32>(&mut tokens, "duration")?;
                job_ops.push((machine, duration));
            }
            ops.push(job_ops);
        }
        if let Some(token) = tokens.next() {
            return Err(ParseError::TrailingInput {
                token: token.to_string(),
            });
        }
        Ok(Self::new(num_jobs, num_machines, &ops))
    }

    /// Reads and parses an instance file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Number of jobs.
    pub fn num_jobs(&self) -> usize {
        self.num_jobs
    }

    /// Number of machines.
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Number of operations per job (equal to the machine count).
    pub fn num_tasks(&self) -> usize {
        self.num_machines
    }

    /// Processing time of operation `task` of `job`.
    pub fn duration(&self, job: usize, task: usize) -> u32 {
        self.durations[job * self.num_tasks() + task]
    }

    /// Processing time of `task`.
    pub fn duration_of(&self, task: Task) -> u32 {
        self.duration(task.job, task.task)
    }

    /// Machine required by operation `task` of `job`.
    pub fn machine(&self, job: usize, task: usize) -> usize {
        self.machines[job * self.num_tasks() + task]
    }

    /// Machine required by `task`.
    pub fn machine_of(&self, task: Task) -> usize {
        self.machine(task.job, task.task)
    }

    /// The operation index at which `job` visits `machine`.
    ///
    /// Well defined because each job visits every machine exactly once.
    pub fn task_with_machine(&self, job: usize, machine: usize) -> usize {
        (0..self.num_tasks())
            .find(|&k| self.machine(job, k) == machine)
            .unwrap_or_else(|| panic!("job {job} never visits machine {machine}"))
    }

    /// Total processing time of all operations of `job`.
    pub fn total_duration(&self, job: usize) -> u32 {
        (0..self.num_tasks()).map(|k| self.duration(job, k)).sum()
    }
}

fn next_number<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<T, ParseError> {
    let token = tokens.next().ok_or(ParseError::UnexpectedEof { expected })?;
    token.parse().map_err(|_| ParseError::InvalidToken {
        token: token.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AAA1: &str = "\
# two jobs, three machines
2 3
0 3 1 3 2 2
0 2 2 2 1 4
";

    #[test]
    fn test_parse_basic() {
        let instance = Instance::parse(AAA1).unwrap();
        assert_eq!(instance.num_jobs(), 2);
        assert_eq!(instance.num_machines(), 3);
        assert_eq!(instance.num_tasks(), 3);
        assert_eq!(instance.duration(0, 0), 3);
        assert_eq!(instance.machine(0, 2), 2);
        assert_eq!(instance.duration(1, 2), 4);
        assert_eq!(instance.machine(1, 1), 2);
    }

    #[test]
    fn test_parse_rejects_truncated_input() {
        let err = Instance::parse("2 3\n0 3 1 3").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Instance::parse("2 x\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidToken { .. }));
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        let input = format!("{AAA1}9 9\n");
        let err = Instance::parse(&input).unwrap_err();
        assert!(matches!(err, ParseError::TrailingInput { token } if token == "9"));
    }

    #[test]
    fn test_task_with_machine() {
        let instance = Instance::parse(AAA1).unwrap();
        assert_eq!(instance.task_with_machine(0, 1), 1);
        assert_eq!(instance.task_with_machine(1, 1), 2);
        assert_eq!(instance.task_with_machine(1, 0), 0);
    }

    #[test]
    fn test_total_duration() {
        let instance = Instance::parse(AAA1).unwrap();
        assert_eq!(instance.total_duration(0), 8);
        assert_eq!(instance.total_duration(1), 8);
    }

    #[test]
    fn test_task_identity() {
        assert_eq!(Task::new(1, 2), Task::new(1, 2));
        assert_ne!(Task::new(1, 2), Task::new(2, 1));
        assert_eq!(Task::new(0, 3).to_string(), "(0,3)");
    }
}
