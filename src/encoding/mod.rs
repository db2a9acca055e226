//! Solution encodings.
//!
//! Two representations of a candidate solution:
//!
//! - [`ResourceOrder`]: per machine, the order in which operations pass over
//!   it. This is the search-space encoding: swaps of two positions on one
//!   machine are the moves of the local-search solvers.
//! - [`Schedule`]: absolute start times for every operation. This is the
//!   evaluated form: makespan, validity and the critical path are all
//!   questions about start times.
//!
//! A `ResourceOrder` is decoded into a `Schedule` by simulation
//! ([`ResourceOrder::decode`]); an order whose machine sequences contradict
//! job precedence has no schedule at all and decodes to `None`.

mod resource_order;
mod schedule;

pub use resource_order::ResourceOrder;
pub use schedule::Schedule;
