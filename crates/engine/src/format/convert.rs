//! Conversions between signed fixed-point integers and [`FloatValue`].
//!
//! Both directions treat the integer as a plain signed quantity (no
//! fractional scale). Decoding truncates toward zero: any value with
//! magnitude below one converts to integer zero, and values beyond the
//! signed range of the requested width saturate to the range bounds.

use crate::common::constants::{EXPONENT_BIAS, MANTISSA_BITS, MANTISSA_MASK, MAX_INT_WIDTH};
use crate::format::FloatValue;

/// Encodes a `width`-bit signed integer as a [`FloatValue`].
///
/// The magnitude is left-normalized so the leading one becomes the implicit
/// bit; the true exponent is the bit position of that leading one. Zero
/// encodes as the canonical zero value.
///
/// # Panics
///
/// Panics if `width` is outside `1..=24` or `value` does not fit in `width`
/// signed bits.
pub fn signed_to_float(value: i32, width: u32) -> FloatValue {
    assert!(
        (1..=MAX_INT_WIDTH).contains(&width),
        "integer width {width} outside 1..=24"
    );
    let bound = 1i32 << (width - 1);
    assert!(
        (-bound..bound).contains(&value),
        "value {value} does not fit in {width} signed bits"
    );

    if value == 0 {
        return FloatValue::zero();
    }

    let sign = value < 0;
    let magnitude = value.unsigned_abs();
    let msb = 31 - magnitude.leading_zeros();
    let significand = magnitude << (MANTISSA_BITS - msb);
    FloatValue::new(
        sign,
        (msb as i32 + EXPONENT_BIAS) as u32,
        significand & MANTISSA_MASK,
    )
}

/// Decodes a [`FloatValue`] to a `width`-bit signed integer, truncating
/// toward zero.
///
/// Any value with magnitude below one yields zero (fractional values are
/// not representable in the fixed-point domain). Magnitudes beyond the
/// signed `width`-bit range saturate to `-2^(width-1)` or `2^(width-1) - 1`.
///
/// # Panics
///
/// Panics if `width` is outside `1..=24`.
pub fn float_to_signed(value: FloatValue, width: u32) -> i32 {
    assert!(
        (1..=MAX_INT_WIDTH).contains(&width),
        "integer width {width} outside 1..=24"
    );

    if value.is_zero() {
        return 0;
    }

    let true_exp = value.true_exponent();
    if true_exp < 0 {
        // |v| < 1: the integer part is empty.
        return 0;
    }

    let max_positive = (1i64 << (width - 1)) - 1;
    let min_negative = -(1i64 << (width - 1));

    // The exponent alone can exceed the width; saturate before shifting so
    // the magnitude arithmetic stays inside 64 bits.
    if true_exp >= width as i32 {
        return if value.sign() {
            min_negative as i32
        } else {
            max_positive as i32
        };
    }

    // true_exp < width <= 24 here, so the shift count is in 0..=23.
    let magnitude = i64::from(value.significand() >> (MANTISSA_BITS as i32 - true_exp));
    let signed = if value.sign() { -magnitude } else { magnitude };
    signed.clamp(min_negative, max_positive) as i32
}
