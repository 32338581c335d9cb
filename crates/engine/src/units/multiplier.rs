//! Multiplier unit.
//!
//! A four-phase pipeline producing the product of two floating-point values
//! in exactly four clock ticks from request assertion to done assertion:
//! 1. **ExponentSum:** add the true exponents and re-bias; XOR the signs.
//! 2. **Multiply:** 24x24-bit significand multiplication to a 48-bit
//!    product, atomic from the algorithm's perspective.
//! 3. **Normalize:** the product of two significands in [1,2) lies in
//!    [1,4), so at most one right-shift with exponent increment.
//! 4. **Finalize:** truncate to 23 mantissa bits and clamp.
//!
//! Mantissa truncation is round-toward-zero throughout: the bits below the
//! kept 24 are discarded, never rounded.

use tracing::trace;

use crate::common::constants::{EXPONENT_BIAS, MANTISSA_BITS};
use crate::format::FloatValue;
use crate::stats::UnitStats;
use crate::units::handshake::{OperationRequest, UnitState};
use crate::units::{FpUnit, UnitKind, finalize_result};

/// Product bit marking a significand product in [2,4).
const PRODUCT_CARRY_BIT: u64 = 1 << (2 * MANTISSA_BITS + 1);

/// Computation phases of the multiplier unit, one per clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulPhase {
    /// Biased exponent addition and sign derivation.
    ExponentSum,
    /// Significand multiplication.
    Multiply,
    /// Single-step normalization shift.
    Normalize,
    /// Truncate, clamp, and pack.
    Finalize,
}

/// The multiplier unit.
#[derive(Debug, Default)]
pub struct Multiplier {
    a_in: FloatValue,
    b_in: FloatValue,
    request: bool,

    state: UnitState<MulPhase>,
    latched: OperationRequest,

    sign: bool,
    exponent: i32,
    product: u64,
    significand: u32,

    result: FloatValue,
    overflow: bool,
    stats: UnitStats,
}

impl Multiplier {
    /// Creates an idle multiplier unit.
    pub fn new() -> Self {
        Self::default()
    }

    fn step(&mut self) {
        let UnitState::Busy(phase) = self.state else {
            return;
        };
        self.state = match phase {
            MulPhase::ExponentSum => {
                let (a, b) = (self.latched.a, self.latched.b);
                self.sign = a.sign() ^ b.sign();
                // (ea - 128) + (eb - 128) + 128
                self.exponent = a.exponent() as i32 + b.exponent() as i32 - EXPONENT_BIAS;
                UnitState::Busy(MulPhase::Multiply)
            }
            MulPhase::Multiply => {
                // A zero operand contributes a zero significand, so the
                // product collapses to zero with no special casing.
                self.product = u64::from(self.latched.a.significand())
                    * u64::from(self.latched.b.significand());
                UnitState::Busy(MulPhase::Normalize)
            }
            MulPhase::Normalize => {
                self.significand = if self.product & PRODUCT_CARRY_BIT != 0 {
                    self.exponent += 1;
                    (self.product >> (MANTISSA_BITS + 1)) as u32
                } else {
                    (self.product >> MANTISSA_BITS) as u32
                };
                UnitState::Busy(MulPhase::Finalize)
            }
            MulPhase::Finalize => {
                let (result, overflow) =
                    finalize_result(self.sign, self.exponent, self.significand, &mut self.stats);
                self.result = result;
                self.overflow = overflow;
                self.stats.ops_completed += 1;
                trace!(unit = %UnitKind::Multiply, result = %self.result, "done");
                UnitState::Done
            }
        };
    }
}

impl FpUnit for Multiplier {
    fn kind(&self) -> UnitKind {
        UnitKind::Multiply
    }

    fn set_operands(&mut self, a: FloatValue, b: FloatValue) {
        self.a_in = a;
        self.b_in = b;
    }

    fn set_request(&mut self, request: bool) {
        self.request = request;
    }

    fn tick(&mut self) {
        match self.state {
            UnitState::Idle => {
                if self.request {
                    self.latched = OperationRequest {
                        a: self.a_in,
                        b: self.b_in,
                    };
                    self.overflow = false;
                    self.state = UnitState::Busy(MulPhase::ExponentSum);
                    trace!(unit = %UnitKind::Multiply, a = %self.latched.a, b = %self.latched.b, "accepted");
                    self.stats.busy_cycles += 1;
                    self.step();
                }
            }
            UnitState::Busy(_) => {
                self.stats.busy_cycles += 1;
                self.step();
            }
            UnitState::Done => {
                if self.request {
                    self.stats.held_requests += 1;
                } else {
                    self.state = UnitState::Idle;
                }
            }
        }
    }

    fn done(&self) -> bool {
        self.state.is_done()
    }

    fn result(&self) -> FloatValue {
        self.result
    }

    fn overflow(&self) -> bool {
        self.overflow
    }

    fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    fn stats(&self) -> &UnitStats {
        &self.stats
    }
}
