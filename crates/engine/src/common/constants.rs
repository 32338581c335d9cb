//! Format and timing constants for the arithmetic engine.
//!
//! Everything here is fixed by the 32-bit excess-128 format contract: the
//! word is laid out as sign (bit 31), exponent (bits 30-23, excess-128),
//! and mantissa (bits 22-0, implicit leading one). Latency constants are
//! part of the engine's external contract and are asserted by the
//! conformance tests, not merely documented.

/// Width of the stored exponent field in bits.
pub const EXPONENT_BITS: u32 = 8;

/// Width of the stored mantissa field in bits (implicit leading one not stored).
pub const MANTISSA_BITS: u32 = 23;

/// Width of the full significand in bits: the implicit one plus the mantissa.
pub const SIGNIFICAND_BITS: u32 = MANTISSA_BITS + 1;

/// Exponent bias: stored exponent = true exponent + 128.
pub const EXPONENT_BIAS: i32 = 128;

/// Largest storable exponent value (all ones).
pub const EXPONENT_MAX: u32 = (1 << EXPONENT_BITS) - 1;

/// Mask selecting the 23 stored mantissa bits.
pub const MANTISSA_MASK: u32 = (1 << MANTISSA_BITS) - 1;

/// The implicit leading one, at bit 23 of the unpacked significand.
pub const IMPLICIT_ONE: u32 = 1 << MANTISSA_BITS;

/// Bit position of the sign in the packed 32-bit word.
pub const SIGN_SHIFT: u32 = 31;

/// Bit position of the exponent field in the packed 32-bit word.
pub const EXPONENT_SHIFT: u32 = MANTISSA_BITS;

/// Mask selecting the stored exponent after shifting.
pub const EXPONENT_MASK: u32 = (1 << EXPONENT_BITS) - 1;

/// Widest signed integer the fixed-point conversions accept or produce.
pub const MAX_INT_WIDTH: u32 = 24;

/// Ticks from request assertion to done assertion for the add/subtract unit.
pub const ADD_LATENCY: u64 = 4;

/// Ticks from request assertion to done assertion for the multiplier unit.
pub const MUL_LATENCY: u64 = 4;

/// Non-restoring iteration steps per division: one per output quotient bit
/// (the integer bit plus 24 fraction bits). Fixed, no early exit.
pub const DIV_STEPS: u32 = SIGNIFICAND_BITS + 1;

/// Ticks from request assertion to done assertion for the division unit:
/// setup, the iteration steps, corrective addition, normalize, finalize.
pub const DIV_LATENCY: u64 = DIV_STEPS as u64 + 4;
