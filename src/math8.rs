//! Division-free integer helpers
//!
//! Divisions by a build-time constant `N` are replaced with a multiply by the
//! 16-bit reciprocal `round(65536 / N)` followed by a 16-bit right shift.
//! For divisors that are not powers of two the result is an approximation;
//! the small rounding bias is part of the animation output.

/// Fractional bits carried by reciprocal constants
pub const RECIP_SHIFT: u32 = 16;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// `scale == 255` returns `value` unchanged and `scale == 0` returns 0.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Reciprocal constant for divisor `n`, rounded to nearest: `round(65536 / n)`
///
/// Meant for `const` items; a divisor below 2 does not fit in 16 bits and
/// fails const evaluation.
#[allow(clippy::cast_possible_truncation)]
pub const fn recip16(n: u16) -> u16 {
    assert!(n >= 2, "reciprocal divisor must be at least 2");
    let n = n as u32;
    (((1 << RECIP_SHIFT) + n / 2) / n) as u16
}

/// Approximate `value / n` as `(value * recip16(n)) >> 16`
///
/// `value * recip` must stay below `2^32`.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn mul_recip16(value: u32, recip: u16) -> u32 {
    (value * recip as u32) >> RECIP_SHIFT
}
