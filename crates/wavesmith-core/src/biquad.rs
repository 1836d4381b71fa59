//! Second-order IIR section.
//!
//! Only the low-pass response is designed here, from the RBJ Audio EQ
//! Cookbook. Coefficients are stored normalized so `a0` never appears on the
//! audio path.

use core::f32::consts::TAU;
use libm::{cosf, sinf};

use crate::math::flush_denormal;

/// Q factor giving a maximally flat (Butterworth) second-order response.
pub const BUTTERWORTH_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Biquad transfer function with `a0` divided out.
///
/// ```text
///         b0 + b1 z^-1 + b2 z^-2
/// H(z) = ------------------------
///          1 + a1 z^-1 + a2 z^-2
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward taps.
    pub b: [f32; 3],
    /// Feedback taps `a1`, `a2`.
    pub a: [f32; 2],
}

impl Coefficients {
    /// `H(z) = 1`.
    pub const IDENTITY: Self = Self {
        b: [1.0, 0.0, 0.0],
        a: [0.0, 0.0],
    };

    /// Divide every tap by `a0`.
    pub fn from_raw(b: [f32; 3], a0: f32, a: [f32; 2]) -> Self {
        let inv = 1.0 / a0;
        Self {
            b: b.map(|tap| tap * inv),
            a: a.map(|tap| tap * inv),
        }
    }

    /// Sum of the taps' gains at DC.
    pub fn dc_gain(&self) -> f32 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// RBJ low-pass design for `cutoff_hz` at `sample_rate`.
///
/// The cutoff must sit strictly between 0 and Nyquist; callers clamp it.
pub fn lowpass_coefficients(cutoff_hz: f32, q: f32, sample_rate: f32) -> Coefficients {
    let w0 = TAU * cutoff_hz / sample_rate;
    let cos_w0 = cosf(w0);
    let alpha = sinf(w0) / (2.0 * q);

    let side = (1.0 - cos_w0) * 0.5;
    Coefficients::from_raw(
        [side, 2.0 * side, side],
        1.0 + alpha,
        [-2.0 * cos_w0, 1.0 - alpha],
    )
}

/// One Direct Form I section.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coeffs: Coefficients,
    /// `x[n-1]`, `x[n-2]`
    inputs: [f32; 2],
    /// `y[n-1]`, `y[n-2]`
    outputs: [f32; 2],
}

impl Biquad {
    /// A section that passes its input through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// A section running `coeffs` from silence.
    pub fn with_coefficients(coeffs: Coefficients) -> Self {
        Self {
            coeffs,
            ..Self::default()
        }
    }

    /// Butterworth low-pass section.
    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::with_coefficients(lowpass_coefficients(cutoff_hz, BUTTERWORTH_Q, sample_rate))
    }

    /// Swap the transfer function, keeping the delay lines.
    pub fn set_coefficients(&mut self, coeffs: Coefficients) {
        self.coeffs = coeffs;
    }

    /// Current transfer function.
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let Coefficients { b, a } = self.coeffs;
        let [x1, x2] = self.inputs;
        let [y1, y2] = self.outputs;

        let output = b[0] * input + b[1] * x1 + b[2] * x2 - a[0] * y1 - a[1] * y2;

        self.inputs = [input, x1];
        self.outputs = [flush_denormal(output), y1];
        output
    }

    /// Filter a whole buffer in place.
    #[inline]
    pub fn process_in_place(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero the delay lines.
    pub fn clear(&mut self) {
        self.inputs = [0.0; 2];
        self.outputs = [0.0; 2];
    }
}
