//! Cascaded low-pass bank used to band-limit an oversampled signal.
//!
//! A wavetable read out at `K` times the output rate still contains whatever
//! harmonics the table holds, plus the images introduced by linear
//! interpolation. Before the stream is decimated back to the output rate
//! everything above the audible band has to go, otherwise it folds back below
//! Nyquist as aliasing.
//!
//! A single second-order section rolls off at 12 dB/octave. Running the same
//! buffer through `N` identical sections multiplies that slope by `N`:
//!
//! ```text
//! |H_total(f)| = |H_stage(f)|^N
//! ```
//!
//! so four Butterworth stages give roughly 48 dB/octave above the cutoff, at the
//! price of -3 dB * N at the cutoff itself.
//!
//! ## Rebuild semantics
//!
//! The bank is immutable once built. A sample-rate change constructs a fresh
//! bank with [`LowpassCascade::new`] and the owner replaces the old value in a
//! single assignment, so a render never sees a partially recoefficiented bank.

use crate::biquad::Biquad;

/// Number of identical low-pass sections in the resampling bank.
pub const NUM_RESAMPLE_FILTERS: usize = 4;

/// Cutoff of the resampling bank, at the upper edge of human hearing.
pub const RESAMPLE_CUTOFF_HZ: f32 = 20_000.0;

/// Highest cutoff allowed, as a fraction of the filter's sample rate.
///
/// The RBJ low-pass collapses as the cutoff approaches Nyquist, so the
/// requested cutoff is pulled below this bound at low oversampled rates.
const MAX_CUTOFF_RATIO: f32 = 0.45;

/// An ordered bank of `N` identical Butterworth low-pass sections.
///
/// # Example
///
/// ```rust
/// use wavesmith_core::{LowpassCascade, RESAMPLE_CUTOFF_HZ};
///
/// // 48 kHz output, 4x oversampled
/// let mut bank: LowpassCascade = LowpassCascade::new(192_000.0, RESAMPLE_CUTOFF_HZ);
///
/// let mut block = [0.0f32; 256];
/// block[0] = 1.0;
/// bank.process_in_place(&mut block);
/// ```
#[derive(Debug, Clone)]
pub struct LowpassCascade<const N: usize = NUM_RESAMPLE_FILTERS> {
    stages: [Biquad; N],
    sample_rate: f32,
    cutoff_hz: f32,
}

impl<const N: usize> LowpassCascade<N> {
    /// Build a bank of `N` low-pass sections for `sample_rate`.
    ///
    /// `cutoff_hz` is capped at `0.45 * sample_rate` so the design stays
    /// stable when the oversampled rate is low.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let cutoff_hz = cutoff_hz.min(sample_rate * MAX_CUTOFF_RATIO);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, cutoff_hz, stages = N, "building low-pass cascade");

        Self {
            stages: core::array::from_fn(|_| Biquad::lowpass(cutoff_hz, sample_rate)),
            sample_rate,
            cutoff_hz,
        }
    }

    /// Run `buffer` through every stage in order.
    ///
    /// Each stage filters the whole buffer before the next stage starts.
    #[inline]
    pub fn process_in_place(&mut self, buffer: &mut [f32]) {
        for stage in &mut self.stages {
            stage.process_in_place(buffer);
        }
    }

    /// Filter one sample through all stages.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(input, |acc, stage| stage.process(acc))
    }

    /// Clear the state of every stage.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
    }

    /// Sample rate the bank was designed for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Effective cutoff after clamping.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        N
    }

    /// True for a zero-stage (passthrough) bank.
    pub fn is_empty(&self) -> bool {
        N == 0
    }
}
