//! Division unit and the non-restoring mantissa divider primitive.
//!
//! Division is the slowest operation in the engine: the quotient mantissa
//! is assembled one bit per clock tick by a non-restoring loop, so the
//! latency scales with the significand width instead of being a small
//! fixed pipeline. The phase sequence is:
//! 1. **Setup:** XOR the signs, subtract the biased exponents and re-bias,
//!    seed the accumulator with the dividend significand.
//! 2. **Iterate:** [`DIV_STEPS`] non-restoring steps, one per tick, no
//!    early exit.
//! 3. **Correct:** one deferred corrective addition if the final remainder
//!    is negative.
//! 4. **Normalize:** two significands in [1,2) divide to a quotient in
//!    (0.5, 2), so at most one shift restores normalized form.
//! 5. **Finalize:** truncate, clamp, and pack.
//!
//! Division by zero has no representation in the format and no error
//! channel exists, so the unit resolves it by policy
//! ([`DivideByZeroPolicy`]): saturate to the max-magnitude value with the
//! computed sign (default, raising the advisory overflow output), or
//! produce zero.

use tracing::{debug, trace};

use crate::common::constants::{DIV_STEPS, EXPONENT_BIAS, SIGNIFICAND_BITS};
use crate::config::{Config, DivideByZeroPolicy};
use crate::format::FloatValue;
use crate::stats::UnitStats;
use crate::units::handshake::{OperationRequest, UnitState};
use crate::units::{FpUnit, UnitKind, finalize_result};

/// Non-restoring mantissa divider: the accumulator holding the running
/// partial remainder and the partially assembled quotient.
///
/// The divisor significand is scaled by two before the loop so the seeded
/// remainder (the dividend significand) is always strictly smaller than it;
/// the recorded bits then form the quotient's integer bit followed by its
/// fraction bits. Each step shifts the remainder left by one, subtracts the
/// scaled divisor if the remainder is non-negative or adds it back if
/// negative, and records a quotient bit equal to the sign of the new
/// remainder. The remainder is only restored once, at the end, by
/// [`correct`](Self::correct).
///
/// Scoped to a single division; the unit reseeds it on every setup phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonRestoringDivider {
    remainder: i32,
    quotient: u32,
}

impl NonRestoringDivider {
    /// Seeds the accumulator with the dividend significand.
    pub const fn new(dividend_sig: u32) -> Self {
        Self {
            remainder: dividend_sig as i32,
            quotient: 0,
        }
    }

    /// Scales a divisor significand for use with the step loop.
    pub const fn scale_divisor(divisor_sig: u32) -> i32 {
        (divisor_sig << 1) as i32
    }

    /// Performs one non-restoring iteration, producing one quotient bit.
    pub const fn step(&mut self, scaled_divisor: i32) {
        self.remainder <<= 1;
        if self.remainder >= 0 {
            self.remainder -= scaled_divisor;
        } else {
            self.remainder += scaled_divisor;
        }
        self.quotient = (self.quotient << 1) | (self.remainder >= 0) as u32;
    }

    /// The deferred corrective addition: restores a negative final
    /// remainder. The quotient is already exact.
    pub const fn correct(&mut self, scaled_divisor: i32) {
        if self.remainder < 0 {
            self.remainder += scaled_divisor;
        }
    }

    /// The assembled quotient bits (one per completed step).
    pub const fn quotient(&self) -> u32 {
        self.quotient
    }

    /// The current partial remainder.
    pub const fn remainder(&self) -> i32 {
        self.remainder
    }

    /// Runs the complete fixed-length loop at once: [`DIV_STEPS`] steps
    /// plus the correction. This is the primitive without the cycle
    /// staging; the division unit performs the same sequence one step per
    /// tick.
    pub fn run(dividend_sig: u32, divisor_sig: u32) -> Self {
        let scaled = Self::scale_divisor(divisor_sig);
        let mut acc = Self::new(dividend_sig);
        for _ in 0..DIV_STEPS {
            acc.step(scaled);
        }
        acc.correct(scaled);
        acc
    }
}

/// Computation phases of the division unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivPhase {
    /// Sign/exponent derivation and accumulator seeding.
    Setup,
    /// One non-restoring step per tick.
    Iterate,
    /// Deferred corrective addition.
    Correct,
    /// Single-step normalization shift.
    Normalize,
    /// Truncate, clamp, and pack.
    Finalize,
}

/// The division unit.
#[derive(Debug)]
pub struct Divider {
    a_in: FloatValue,
    b_in: FloatValue,
    request: bool,

    state: UnitState<DivPhase>,
    latched: OperationRequest,
    policy: DivideByZeroPolicy,

    sign: bool,
    exponent: i32,
    scaled_divisor: i32,
    acc: NonRestoringDivider,
    steps_done: u32,
    significand: u32,
    divide_by_zero: bool,

    result: FloatValue,
    overflow: bool,
    stats: UnitStats,
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

impl Divider {
    /// Creates an idle division unit with the default divide-by-zero policy.
    pub fn new() -> Self {
        Self::with_policy(DivideByZeroPolicy::default())
    }

    /// Creates an idle division unit with an explicit divide-by-zero policy.
    pub fn with_policy(policy: DivideByZeroPolicy) -> Self {
        Self {
            a_in: FloatValue::zero(),
            b_in: FloatValue::zero(),
            request: false,
            state: UnitState::Idle,
            latched: OperationRequest::default(),
            policy,
            sign: false,
            exponent: 0,
            scaled_divisor: 0,
            acc: NonRestoringDivider::default(),
            steps_done: 0,
            significand: 0,
            divide_by_zero: false,
            result: FloatValue::zero(),
            overflow: false,
            stats: UnitStats::default(),
        }
    }

    /// Creates an idle division unit configured from a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::with_policy(config.divider.divide_by_zero)
    }

    fn step(&mut self) {
        let UnitState::Busy(phase) = self.state else {
            return;
        };
        self.state = match phase {
            DivPhase::Setup => {
                let (a, b) = (self.latched.a, self.latched.b);
                self.sign = a.sign() ^ b.sign();
                // (ea - 128) - (eb - 128) + 128
                self.exponent = a.exponent() as i32 - b.exponent() as i32 + EXPONENT_BIAS;
                self.divide_by_zero = b.is_zero();
                self.scaled_divisor = NonRestoringDivider::scale_divisor(b.significand());
                self.acc = NonRestoringDivider::new(a.significand());
                self.steps_done = 0;
                UnitState::Busy(DivPhase::Iterate)
            }
            DivPhase::Iterate => {
                // The iteration count is fixed even when the quotient is
                // already decided (zero dividend or zero divisor): latency
                // does not depend on the operand values.
                if !self.divide_by_zero {
                    self.acc.step(self.scaled_divisor);
                }
                self.steps_done += 1;
                if self.steps_done == DIV_STEPS {
                    UnitState::Busy(DivPhase::Correct)
                } else {
                    UnitState::Busy(DivPhase::Iterate)
                }
            }
            DivPhase::Correct => {
                if !self.divide_by_zero {
                    self.acc.correct(self.scaled_divisor);
                }
                UnitState::Busy(DivPhase::Normalize)
            }
            DivPhase::Normalize => {
                let q = self.acc.quotient();
                self.significand = if q == 0 {
                    0
                } else if q & (1 << SIGNIFICAND_BITS) != 0 {
                    // Quotient in [1,2): drop the guard bit (truncation).
                    q >> 1
                } else {
                    // Quotient in (0.5,1): already 24 significant bits.
                    self.exponent -= 1;
                    q
                };
                UnitState::Busy(DivPhase::Finalize)
            }
            DivPhase::Finalize => {
                if self.divide_by_zero {
                    debug!(unit = %UnitKind::Divide, policy = ?self.policy, "division by zero");
                    match self.policy {
                        DivideByZeroPolicy::Saturate => {
                            self.result = FloatValue::max_magnitude(self.sign);
                            self.overflow = true;
                            self.stats.overflow_events += 1;
                        }
                        DivideByZeroPolicy::Zero => {
                            self.result = FloatValue::signed_zero(self.sign);
                            self.overflow = false;
                        }
                    }
                } else {
                    let (result, overflow) =
                        finalize_result(self.sign, self.exponent, self.significand, &mut self.stats);
                    self.result = result;
                    self.overflow = overflow;
                }
                self.stats.ops_completed += 1;
                trace!(unit = %UnitKind::Divide, result = %self.result, "done");
                UnitState::Done
            }
        };
    }
}

impl FpUnit for Divider {
    fn kind(&self) -> UnitKind {
        UnitKind::Divide
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
                    self.state = UnitState::Busy(DivPhase::Setup);
                    trace!(unit = %UnitKind::Divide, a = %self.latched.a, b = %self.latched.b, "accepted");
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
