//! Reinterprets the raw bit patterns carried by major type 7 events.
//!
//! The decoder never interprets floating-point values. A half precision float
//! arrives through [`Listener::on_simple`][crate::Listener::on_simple] with a
//! 2-byte argument, a single precision float with a 4-byte argument, and a
//! double precision float through
//! [`Listener::on_extra_simple`][crate::Listener::on_extra_simple]. Listeners
//! which know the argument width can use these helpers.

use half::f16;

/// Converts the bits of an IEEE 754 half precision float to an `f32`.
///
/// The conversion is lossless.
#[inline]
#[must_use]
pub fn f16_bits_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Reinterprets the bits of an IEEE 754 single precision float.
#[inline]
#[must_use]
pub fn f32_from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Reinterprets the bits of an IEEE 754 double precision float.
#[inline]
#[must_use]
pub fn f64_from_bits(bits: u64) -> f64 {
    f64::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_half() {
        assert_eq!(f16_bits_to_f32(0x0000), 0.0);
        assert_eq!(f16_bits_to_f32(0x3c00), 1.0);
        assert_eq!(f16_bits_to_f32(0x3e00), 1.5);
        assert_eq!(f16_bits_to_f32(0x7bff), 65504.0);
        assert_eq!(f16_bits_to_f32(0xc400), -4.0);
        assert_eq!(f16_bits_to_f32(0x0001), 5.960_464_5e-8);
        assert!(f16_bits_to_f32(0x7c00).is_infinite());
        assert!(f16_bits_to_f32(0x7e00).is_nan());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_single_and_double() {
        assert_eq!(f32_from_bits(0x47c3_5000), 100_000.0);
        assert_eq!(f64_from_bits(0x3ff1_9999_9999_999a), 1.1);
        assert!(f64_from_bits(0xfff0_0000_0000_0000).is_infinite());
    }
}
