//! Collection core
//!
//! - [`worker`] - one manager, one cycle at a time
//! - [`scheduler`] - all workers, one tick at a time
//! - [`report`] - what a cycle produced

pub mod report;
pub mod scheduler;
pub mod worker;

pub use report::{CycleReport, Domain, DomainFailure, WriteOutcome};
pub use scheduler::Scheduler;
pub use worker::Worker;
