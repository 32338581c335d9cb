//! Processing units and the contract they share.
//!
//! This module contains the three cycle-staged arithmetic units and the
//! handshake protocol that governs how a caller drives any of them:
//! - [`adder`]: four-phase add/subtract unit.
//! - [`multiplier`]: four-phase multiplier unit.
//! - [`divider`]: iterative non-restoring division unit.
//! - [`handshake`]: the shared request/compute/done/release state machine.
//!
//! Units are fully independent: each owns its own state machine, advances
//! exactly one phase per clock tick, and shares nothing with its peers. At
//! most one operation is in flight per unit instance.

/// Four-phase add/subtract unit.
pub mod adder;

/// Iterative non-restoring division unit and its mantissa-divider primitive.
pub mod divider;

/// Shared request/acknowledge handshake state machine.
pub mod handshake;

/// Four-phase multiplier unit.
pub mod multiplier;

use std::fmt;

use serde::Serialize;

use crate::common::constants::{EXPONENT_MAX, MANTISSA_MASK};
use crate::format::FloatValue;
use crate::stats::UnitStats;

/// Which arithmetic operation a unit performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnitKind {
    /// Add/subtract unit.
    Add,
    /// Multiplier unit.
    Multiply,
    /// Division unit.
    Divide,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Multiply => write!(f, "multiply"),
            Self::Divide => write!(f, "divide"),
        }
    }
}

/// The per-unit operation contract.
///
/// Callers drive a unit through its handshake: present both operands, assert
/// the request, call [`tick`](FpUnit::tick) once per clock until
/// [`done`](FpUnit::done) is observed, read the result, then de-assert the
/// request and tick once more to release the unit back to idle.
///
/// Operand and request inputs are level signals: they are sampled on tick
/// boundaries, and the operands are latched on the tick where a request is
/// accepted. Changing them afterwards has no effect on the in-flight
/// operation.
pub trait FpUnit: fmt::Debug {
    /// The operation this unit performs.
    fn kind(&self) -> UnitKind;

    /// Drives the operand input ports.
    fn set_operands(&mut self, a: FloatValue, b: FloatValue);

    /// Drives the request input port.
    fn set_request(&mut self, request: bool);

    /// Advances the unit by one clock tick.
    fn tick(&mut self);

    /// Whether the done output is asserted (result valid and stable).
    fn done(&self) -> bool;

    /// The result output. Defined once `done` is asserted; holds its value
    /// until the unit is released.
    fn result(&self) -> FloatValue;

    /// Advisory overflow output for the operation last completed. Never
    /// required to be checked.
    fn overflow(&self) -> bool;

    /// Whether the unit is idle (no operation in flight, no result held).
    fn is_idle(&self) -> bool;

    /// Counters accumulated over this unit's lifetime.
    fn stats(&self) -> &UnitStats;
}

/// Shared finalize step: packs a normalized significand and widened biased
/// exponent into a [`FloatValue`], applying the engine's clamp rules.
///
/// Exponent above the storable range clamps to the max-magnitude value with
/// the computed sign (advisory overflow). Exponent below the smallest
/// normalized encoding, or a zero significand, produces zero. Returns the
/// packed result and the overflow flag.
pub(crate) fn finalize_result(
    sign: bool,
    exponent: i32,
    significand: u32,
    stats: &mut UnitStats,
) -> (FloatValue, bool) {
    if significand == 0 {
        return (FloatValue::signed_zero(sign), false);
    }
    if exponent > EXPONENT_MAX as i32 {
        stats.overflow_events += 1;
        (FloatValue::max_magnitude(sign), true)
    } else if exponent < 1 {
        stats.underflow_events += 1;
        (FloatValue::signed_zero(sign), false)
    } else {
        (
            FloatValue::new(sign, exponent as u32, significand & MANTISSA_MASK),
            false,
        )
    }
}
