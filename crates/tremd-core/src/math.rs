//! Mathematical utility functions for DSP.
//!
//! Small, allocation-free helpers used inside per-sample loops. All of them
//! are `no_std` and lean on `libm` for transcendental functions.
//!
//! - [`flush_denormal`] - Zero out denormal-range values in feedback loops
//! - [`finite_or_zero`] - Replace `NaN`/`Inf` with silence
//! - [`rectified_power`] - Half-wave rectified power curve
//! - [`half_sine`] - `sin(π · phase)` over one cycle

use core::f32::consts::PI;
use libm::{powf, sinf};

/// Flush denormal numbers to zero.
///
/// Denormals appear when feedback decays toward silence and are very slow
/// on most CPUs.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Returns `x`, or `0.0` when `x` is `NaN` or infinite.
///
/// # Example
///
/// ```rust
/// use tremd_core::finite_or_zero;
///
/// assert_eq!(finite_or_zero(0.5), 0.5);
/// assert_eq!(finite_or_zero(f32::NAN), 0.0);
/// assert_eq!(finite_or_zero(f32::NEG_INFINITY), 0.0);
/// ```
#[inline]
pub fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() { x } else { 0.0 }
}

/// `max(scale · x, 0) ^ exponent`.
///
/// The base is clamped non-negative before exponentiation so fractional
/// exponents never see a negative base.
///
/// # Example
///
/// ```rust
/// use tremd_core::rectified_power;
///
/// assert_eq!(rectified_power(0.5, 2.0, 2.0), 1.0);
/// assert_eq!(rectified_power(-0.5, 2.0, 1.5), 0.0);
/// ```
#[inline]
pub fn rectified_power(x: f32, scale: f32, exponent: f32) -> f32 {
    let base = (scale * x).max(0.0);
    if base == 0.0 {
        return 0.0;
    }
    powf(base, exponent)
}

/// `sin(π · index / len)`: zero at the cycle start, one at mid-cycle.
///
/// `len` must be non-zero.
#[inline]
pub fn half_sine(index: usize, len: usize) -> f32 {
    sinf(PI * index as f32 / len as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.001), 0.001);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(f32::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-3.0), -3.0);
    }

    #[test]
    fn test_rectified_power() {
        assert_eq!(rectified_power(0.0, 5.0, 5.0), 0.0);
        assert_eq!(rectified_power(-1.0, 1.0, 1.0), 0.0);
        assert!((rectified_power(0.5, 1.0, 3.0) - 0.125).abs() < 1e-6);
        // Negative scale flips the rectified half
        assert!((rectified_power(-0.5, -2.0, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rectified_power_is_finite_at_extremes() {
        let y = rectified_power(20.0, 5.0, 5.0);
        assert!(y.is_finite());
        assert!(y > 0.0);
    }

    #[test]
    fn test_half_sine() {
        assert_eq!(half_sine(0, 8), 0.0);
        assert!((half_sine(4, 8) - 1.0).abs() < 1e-6);
        assert!((half_sine(2, 8) - half_sine(6, 8)).abs() < 1e-6);
    }
}
