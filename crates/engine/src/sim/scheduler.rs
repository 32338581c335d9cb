//! Scheduler: synchronous, cooperative advancement of unit instances.
//!
//! Scheduling is clock-driven with no preemption: every registered unit
//! advances its own state machine by exactly one phase per global tick, and
//! no unit ever blocks another. Units share no mutable state; at most one
//! operation is in flight per unit instance, while the scheduler as a whole
//! supports arbitrarily many concurrent unit instances, each at its own
//! pace.

use tracing::trace;

use crate::config::Config;
use crate::format::FloatValue;
use crate::stats::{SchedulerReport, UnitReport};
use crate::units::FpUnit;

/// Opaque handle to a unit registered with a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitHandle(usize);

/// Advances a heterogeneous set of processing units one tick at a time.
#[derive(Debug, Default)]
pub struct Scheduler {
    units: Vec<Box<dyn FpUnit>>,
    cycles: u64,
    trace: bool,
}

impl Scheduler {
    /// Creates an empty scheduler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scheduler with settings from a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            units: Vec::new(),
            cycles: 0,
            trace: config.sim.trace,
        }
    }

    /// Registers a unit and returns its handle.
    pub fn add_unit(&mut self, unit: Box<dyn FpUnit>) -> UnitHandle {
        self.units.push(unit);
        UnitHandle(self.units.len() - 1)
    }

    /// Borrows a registered unit.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to a different scheduler.
    pub fn unit(&self, handle: UnitHandle) -> &dyn FpUnit {
        self.units[handle.0].as_ref()
    }

    /// Mutably borrows a registered unit (to drive its input ports).
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to a different scheduler.
    pub fn unit_mut(&mut self, handle: UnitHandle) -> &mut dyn FpUnit {
        self.units[handle.0].as_mut()
    }

    /// Advances every registered unit by one clock tick.
    pub fn tick(&mut self) {
        if self.trace {
            trace!(cycle = self.cycles, "tick");
        }
        for unit in &mut self.units {
            unit.tick();
        }
        self.cycles += 1;
    }

    /// Global clock ticks elapsed.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Drives one complete handshake on the given unit: present the
    /// operands, assert the request, tick until done, read the result,
    /// release, and tick once more so the unit returns to idle.
    ///
    /// Every other registered unit keeps advancing during the wait, so
    /// concurrent operations started through their own ports make progress
    /// at their own pace.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to a different scheduler.
    pub fn execute(&mut self, handle: UnitHandle, a: FloatValue, b: FloatValue) -> FloatValue {
        let unit = self.unit_mut(handle);
        unit.set_operands(a, b);
        unit.set_request(true);
        loop {
            self.tick();
            if self.unit(handle).done() {
                break;
            }
        }
        let result = self.unit(handle).result();
        self.unit_mut(handle).set_request(false);
        self.tick();
        result
    }

    /// Snapshot of the global cycle count and every unit's counters.
    pub fn report(&self) -> SchedulerReport {
        SchedulerReport {
            cycles: self.cycles,
            units: self
                .units
                .iter()
                .map(|unit| UnitReport {
                    kind: unit.kind(),
                    stats: *unit.stats(),
                })
                .collect(),
        }
    }
}
