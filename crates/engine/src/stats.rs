//! Statistics collection and reporting.
//!
//! This module tracks activity counters for the engine. It provides:
//! 1. **Per-unit counters:** Operations completed, busy cycles, overflow
//!    clamps, and held requests, accumulated by each unit over its lifetime.
//! 2. **Scheduler report:** A serializable snapshot aggregating every unit
//!    under a scheduler together with the global cycle count.

use serde::Serialize;

use crate::common::error::EngineError;
use crate::units::UnitKind;

/// Activity counters accumulated by one unit instance.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct UnitStats {
    /// Operations completed (handshakes that reached `Done`).
    pub ops_completed: u64,
    /// Ticks spent in a computation phase (excludes idle and done-hold ticks).
    pub busy_cycles: u64,
    /// Results clamped for exponent overflow (includes saturated divisions
    /// by zero).
    pub overflow_events: u64,
    /// Results flushed to zero for exponent underflow.
    pub underflow_events: u64,
    /// Ticks where a request was observed still asserted in the done-hold
    /// state. A large count usually means a caller is violating the
    /// two-phase release.
    pub held_requests: u64,
}

impl UnitStats {
    /// Fraction of the given cycle span this unit spent computing.
    pub fn utilization(&self, total_cycles: u64) -> f64 {
        if total_cycles == 0 {
            0.0
        } else {
            self.busy_cycles as f64 / total_cycles as f64
        }
    }
}

/// Statistics snapshot for one unit under a scheduler.
#[derive(Clone, Debug, Serialize)]
pub struct UnitReport {
    /// The operation the unit performs.
    pub kind: UnitKind,
    /// The unit's accumulated counters.
    pub stats: UnitStats,
}

/// Aggregated statistics for a scheduler and every unit it owns.
#[derive(Clone, Debug, Serialize)]
pub struct SchedulerReport {
    /// Global clock ticks elapsed.
    pub cycles: u64,
    /// Per-unit snapshots, in registration order.
    pub units: Vec<UnitReport>,
}

impl SchedulerReport {
    /// Serializes the report to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(EngineError::Report)
    }
}
