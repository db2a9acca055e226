//! Heuristic search engine for the classic job-shop scheduling problem.
//!
//! A fixed set of jobs, each a sequence of operations that must run in
//! order, competes for machines that process one operation at a time. The
//! engine searches, within a time budget, for a per-machine processing
//! order that decodes into a feasible schedule of minimum makespan.
//!
//! # Modules
//!
//! - **`instance`**: immutable problem description (`Instance`, `Task`) and
//!   the standard textual format parser.
//! - **`encoding`**: the resource-order search encoding, its decoding
//!   simulation, and decoded schedules with makespan / validity /
//!   critical-path queries.
//! - **`neighborhood`**: the Nowicki-Smutnicki block neighborhood over the
//!   critical path.
//! - **`solvers`**: greedy priority-rule dispatch, multistart steepest
//!   descent, tabu search, and the name-based solver registry.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! use jobshop_heur::instance::Instance;
//! use jobshop_heur::solvers::solver_for_name;
//!
//! let instance = Arc::new(Instance::parse("2 2\n0 3 1 2\n1 2 0 3\n")?);
//! let solver = solver_for_name("desc_spt")?;
//! let deadline = Instant::now() + Duration::from_millis(100);
//! if let Some(schedule) = solver.solve(&instance, deadline) {
//!     assert!(schedule.is_valid());
//!     println!("makespan {}", schedule.makespan());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design
//!
//! The engine is single-threaded and anytime: every solver checks an
//! absolute deadline at loop boundaries and returns the best feasible
//! schedule assembled so far, or `None` when none was found in budget.
//! Candidate orders are value-like: neighbor generation copies, never
//! mutates, so many candidates can be derived from one base independently.
//!
//! # References
//!
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//!   Job Shop Problem"
//! - Glover (1989), "Tabu Search—Part I"
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

pub mod encoding;
pub mod instance;
pub mod neighborhood;
pub mod solvers;
