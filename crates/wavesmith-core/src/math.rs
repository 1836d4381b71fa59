//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`linear_to_db`] - Linear magnitude to dBFS for reporting
//!
//! # Buffer Helpers
//!
//! - [`peak_magnitude`] - Largest absolute sample value
//! - [`apply_gain`] - In-place linear gain
//!
//! # Utilities
//!
//! - [`lerp`] - Linear interpolation
//! - [`rem_euclid_f32`] - Wrap a value into `[0, modulus)`
//! - [`ms_to_samples`] - Time conversion
//! - [`flush_denormal`] - Snap subnormals to zero

use libm::{floorf, logf};

/// Convert a linear magnitude to decibels.
///
/// Inputs at or below zero are floored to -200 dB.
///
/// ```rust
/// use wavesmith_core::linear_to_db;
///
/// assert!((linear_to_db(0.5) + 6.02).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    if linear <= 1e-10 {
        return -200.0;
    }
    logf(linear) * FACTOR
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Euclidean remainder for f32, compatible with no_std.
///
/// The result lies in `[0, modulus)` for any finite `value`, including
/// negative ones.
#[inline]
pub fn rem_euclid_f32(value: f32, modulus: f32) -> f32 {
    let r = value - modulus * floorf(value / modulus);
    // Rounding can land exactly on the modulus for tiny negative inputs.
    if r >= modulus || r < 0.0 { 0.0 } else { r }
}

/// Convert milliseconds to a (fractional) sample count.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Largest absolute value in `buffer`, 0.0 for an empty buffer.
#[inline]
pub fn peak_magnitude(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |peak, &s| peak.max(s.abs()))
}

/// Multiply every sample by `gain` in place.
#[inline]
pub fn apply_gain(buffer: &mut [f32], gain: f32) {
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}

/// Flush subnormal values to zero.
///
/// Filter feedback paths decay asymptotically toward zero and can sit in the
/// subnormal range for a long time, which is very slow on x86.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
