//! Signed fixed-point conversion tests.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use fpsim_core::FloatValue;
use fpsim_core::format::{float_to_signed, signed_to_float};

use crate::common::fv;

#[test]
fn sixteen_encodes_per_contract() {
    // signed_to_float(16, 16): sign 0, exponent 128 + 4 = 132, mantissa
    // encodes 1.0 (no fraction bits).
    let v = signed_to_float(16, 16);
    assert!(!v.sign());
    assert_eq!(v.exponent(), 132);
    assert_eq!(v.mantissa(), 0);
}

#[rstest]
#[case(1, fv(false, 0, 0))]
#[case(-1, fv(true, 0, 0))]
#[case(3, fv(false, 1, 0x400000))]
#[case(10, fv(false, 3, 0x200000))]
#[case(-8_388_608, fv(true, 23, 0))]
#[case(8_388_607, fv(false, 22, 0x7FFFFE))]
fn known_encodings(#[case] value: i32, #[case] expected: FloatValue) {
    assert_eq!(signed_to_float(value, 24), expected);
}

#[test]
fn zero_maps_to_canonical_zero() {
    assert_eq!(signed_to_float(0, 24), FloatValue::zero());
    assert_eq!(float_to_signed(FloatValue::zero(), 24), 0);
}

#[test]
fn fractional_magnitudes_truncate_to_zero() {
    // 0.5, 0.999..., and -0.75 all have magnitude below one.
    assert_eq!(float_to_signed(fv(false, -1, 0), 16), 0);
    assert_eq!(float_to_signed(fv(false, -1, 0x7FFFFF), 16), 0);
    assert_eq!(float_to_signed(fv(true, -1, 0x400000), 16), 0);
}

#[test]
fn decoding_truncates_toward_zero() {
    // 2.75 -> 2, -2.75 -> -2.
    let v = fv(false, 1, 0x300000);
    assert_eq!(float_to_signed(v, 16), 2);
    assert_eq!(float_to_signed(v.negated(), 16), -2);
}

#[test]
fn decoding_saturates_to_width_bounds() {
    // 2^20 does not fit in 16 bits.
    let big = fv(false, 20, 0);
    assert_eq!(float_to_signed(big, 16), 32767);
    assert_eq!(float_to_signed(big.negated(), 16), -32768);
    // The max-magnitude value saturates at any width.
    assert_eq!(float_to_signed(FloatValue::max_magnitude(false), 24), 8_388_607);
    assert_eq!(float_to_signed(FloatValue::max_magnitude(true), 24), -8_388_608);
}

#[test]
fn exact_negative_bound_is_representable() {
    // -2^15 fits 16 bits exactly; +2^15 does not.
    let v = fv(true, 15, 0);
    assert_eq!(float_to_signed(v, 16), -32768);
    assert_eq!(float_to_signed(v.negated(), 16), 32767);
}

proptest! {
    /// Round-trip: every integer with |n| < 2^23 survives encode/decode.
    #[test]
    fn round_trip_is_identity(n in -8_388_607i32..=8_388_607) {
        prop_assert_eq!(float_to_signed(signed_to_float(n, 24), 24), n);
    }

    /// Round-trip at narrower widths.
    #[test]
    fn round_trip_is_identity_16(n in -32_768i32..=32_767) {
        prop_assert_eq!(float_to_signed(signed_to_float(n, 16), 16), n);
    }

    /// Encoded nonzero integers are always normalized: implicit bit set.
    #[test]
    fn encoding_is_normalized(n in 1i32..=8_388_607) {
        let v = signed_to_float(n, 24);
        prop_assert!(v.significand() >= 0x800000);
        prop_assert_eq!(v.significand() & 0x800000, 0x800000);
    }
}
