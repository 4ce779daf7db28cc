//! This module contains the integer rounding and narrowing primitives shared by
//! the stage kernels.
//!
//! Every helper states its rounding direction in its name. Widening is done with
//! `From` conversions at the call sites; narrowing to `i8` only happens through
//! the saturating functions below. This module is PURE RUST and panic-free.

use num_traits::{PrimInt, Signed};

use crate::error::MemconvError;

//==================================================================================
// 1. Division Primitives
//==================================================================================

fn check_divisor<T: PrimInt + Signed>(d: T) -> Result<(), MemconvError> {
    if d <= T::zero() {
        return Err(MemconvError::ConfigError(
            "divisor must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Divides by a positive `d`, truncating toward zero (`-7 / 4 == -1`).
pub fn div_trunc<T: PrimInt + Signed>(x: T, d: T) -> Result<T, MemconvError> {
    check_divisor(d)?;
    // Rust's integer division already truncates; with d > 0 it cannot overflow.
    Ok(x / d)
}

//==================================================================================
// 2. Narrowing Primitives
//==================================================================================

/// Saturates a wide accumulator into the signed 8-bit range.
pub fn saturate_i8(value: i64) -> i8 {
    // The clamp guarantees the cast is lossless.
    value.clamp(i64::from(i8::MIN), i64::from(i8::MAX)) as i8
}

/// Rounds half away from zero (`3.5 -> 4`, `-2.5 -> -3`).
pub fn round_half_away(value: f64) -> f64 {
    value.round()
}

/// Rounds half away from zero, then saturates into the signed 8-bit range.
///
/// `NaN` maps to `0`.
pub fn saturate_real_i8(value: f64) -> i8 {
    if value.is_nan() {
        return 0;
    }
    round_half_away(value).clamp(f64::from(i8::MIN), f64::from(i8::MAX)) as i8
}

/// Maps a clamped signed sample onto the unsigned display range (`-128 -> 0`).
pub fn to_display_byte(value: i8) -> u8 {
    (i16::from(value) + 128) as u8
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_trunc_rounds_toward_zero() {
        assert_eq!(div_trunc(-7i64, 4).unwrap(), -1);
        assert_eq!(div_trunc(7i64, 4).unwrap(), 1);
        assert_eq!(div_trunc(-8i32, 4).unwrap(), -2);
        assert_eq!(div_trunc(-3i32, 4).unwrap(), 0);
    }

    #[test]
    fn test_non_positive_divisor_is_config_error() {
        assert!(matches!(div_trunc(5i32, 0), Err(MemconvError::ConfigError(_))));
        assert!(matches!(div_trunc(5i64, -4), Err(MemconvError::ConfigError(_))));
    }

    #[test]
    fn test_saturating_narrowing() {
        assert_eq!(saturate_i8(300), 127);
        assert_eq!(saturate_i8(-300), -128);
        assert_eq!(saturate_i8(-5), -5);
        assert_eq!(saturate_real_i8(200.6), 127);
        assert_eq!(saturate_real_i8(-200.4), -128);
        assert_eq!(saturate_real_i8(3.5), 4);
        assert_eq!(saturate_real_i8(-3.5), -4);
        assert_eq!(saturate_real_i8(2.4), 2);
        assert_eq!(saturate_real_i8(f64::NAN), 0);
    }

    #[test]
    fn test_display_byte_bias() {
        assert_eq!(to_display_byte(-128), 0);
        assert_eq!(to_display_byte(0), 128);
        assert_eq!(to_display_byte(127), 255);
    }
}
