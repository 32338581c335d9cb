//! Add/subtract unit.
//!
//! A four-phase pipeline producing the sum of two floating-point values in
//! exactly four clock ticks from request assertion to done assertion:
//! 1. **Align:** order the operands by magnitude, derive the exponent
//!    difference, and right-shift the smaller significand by that amount in
//!    a single step (bits shifted beyond the mantissa width are discarded).
//! 2. **Combine:** add the aligned significands when the signs agree, or
//!    subtract the smaller from the larger when they differ.
//! 3. **Normalize:** a single right-shift on carry-out, or a single
//!    left-shift by the leading-zero count after cancellation.
//! 4. **Finalize:** clamp exponent overflow/underflow and pack the result.
//!
//! The unit only adds. Subtraction is expressed by the caller negating one
//! operand (see [`FloatValue::negated`]) before presenting the pair.
//!
//! Shift amounts are computed arithmetically and applied in one operation,
//! which is what keeps the latency at a fixed four ticks regardless of the
//! operand magnitudes.

use tracing::trace;

use crate::common::constants::{MANTISSA_BITS, SIGNIFICAND_BITS};
use crate::format::FloatValue;
use crate::stats::UnitStats;
use crate::units::handshake::{OperationRequest, UnitState};
use crate::units::{FpUnit, UnitKind, finalize_result};

/// Computation phases of the add/subtract unit, one per clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddPhase {
    /// Magnitude comparison and single-step alignment shift.
    Align,
    /// Signed combination of the aligned significands.
    Combine,
    /// Post-combine normalization shift.
    Normalize,
    /// Clamp and pack.
    Finalize,
}

/// The add/subtract unit.
#[derive(Debug, Default)]
pub struct Adder {
    // Input ports, sampled on tick boundaries.
    a_in: FloatValue,
    b_in: FloatValue,
    request: bool,

    state: UnitState<AddPhase>,
    latched: OperationRequest,

    // Work registers carried between phases.
    sign: bool,
    signs_differ: bool,
    exponent: i32,
    big_sig: u32,
    small_sig: u32,
    sum: u32,

    result: FloatValue,
    overflow: bool,
    stats: UnitStats,
}

impl Adder {
    /// Creates an idle add/subtract unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes the phase the unit is currently in and advances the state.
    fn step(&mut self) {
        let UnitState::Busy(phase) = self.state else {
            return;
        };
        self.state = match phase {
            AddPhase::Align => {
                self.align();
                UnitState::Busy(AddPhase::Combine)
            }
            AddPhase::Combine => {
                self.combine();
                UnitState::Busy(AddPhase::Normalize)
            }
            AddPhase::Normalize => {
                self.normalize();
                UnitState::Busy(AddPhase::Finalize)
            }
            AddPhase::Finalize => {
                self.finalize();
                self.stats.ops_completed += 1;
                trace!(unit = %UnitKind::Add, result = %self.result, "done");
                UnitState::Done
            }
        };
    }

    /// Phase 1: order by magnitude and align the smaller significand.
    fn align(&mut self) {
        let (a, b) = (self.latched.a, self.latched.b);
        // Normalized values order by (stored exponent, significand).
        let mag = |v: FloatValue| {
            (u64::from(v.exponent()) << SIGNIFICAND_BITS) | u64::from(v.significand())
        };
        let (big, small) = if mag(a) >= mag(b) { (a, b) } else { (b, a) };

        self.sign = big.sign();
        self.signs_differ = a.sign() != b.sign();
        self.exponent = big.exponent() as i32;
        self.big_sig = big.significand();

        let diff = big.exponent() - small.exponent();
        // A difference beyond the significand width shifts every bit out.
        self.small_sig = if diff >= 32 {
            0
        } else {
            small.significand() >> diff
        };
    }

    /// Phase 2: combine the aligned significands.
    ///
    /// The alignment phase guarantees `big_sig >= small_sig`, so the
    /// differing-sign path cannot underflow. Exact cancellation produces a
    /// positive zero so that addition stays commutative bit-for-bit.
    fn combine(&mut self) {
        if self.signs_differ {
            self.sum = self.big_sig - self.small_sig;
            if self.sum == 0 {
                self.sign = false;
            }
        } else {
            self.sum = self.big_sig + self.small_sig;
        }
    }

    /// Phase 3: restore normalized form with a single shift.
    fn normalize(&mut self) {
        if self.sum & (1 << SIGNIFICAND_BITS) != 0 {
            // Carry out of the significand: one right-shift, discarding the
            // shifted-out bit (truncation).
            self.sum >>= 1;
            self.exponent += 1;
        } else if self.sum != 0 {
            // Cancellation may clear any number of leading bits; the shift
            // amount comes straight from the leading-zero count.
            let msb = 31 - self.sum.leading_zeros();
            let shift = MANTISSA_BITS - msb;
            self.sum <<= shift;
            self.exponent -= shift as i32;
        }
    }

    /// Phase 4: clamp and pack.
    fn finalize(&mut self) {
        let (result, overflow) = finalize_result(self.sign, self.exponent, self.sum, &mut self.stats);
        self.result = result;
        self.overflow = overflow;
    }
}

impl FpUnit for Adder {
    fn kind(&self) -> UnitKind {
        UnitKind::Add
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
                    self.state = UnitState::Busy(AddPhase::Align);
                    trace!(unit = %UnitKind::Add, a = %self.latched.a, b = %self.latched.b, "accepted");
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
                    // Two-phase release: a still-asserted request is not a
                    // new operation.
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
