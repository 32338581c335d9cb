//! Simulation harness: the logical clock over unit instances.
//!
//! The engine has no physical clock; the [`scheduler::Scheduler`] replaces
//! it with an explicit tick operation that advances every registered unit
//! by exactly one phase per call.

/// Scheduler advancing a set of independent units in lock-step.
pub mod scheduler;

pub use scheduler::{Scheduler, UnitHandle};
