//! Single-cycle wavetables and the sources they are cut from.
//!
//! A [`Wavetable`] is a fixed window of [`WAVETABLE_LENGTH`] samples taken
//! from a longer mono [`WavetableSource`] (typically a decoded audio file) and
//! peak-normalized so its largest magnitude is exactly 1.0.
//!
//! ## Window Selection
//!
//! The window start is given as a fraction of the source length:
//!
//! ```text
//! offset = floor(position * source_len)
//! window = source[offset .. offset + WAVETABLE_LENGTH]
//! ```
//!
//! A window that would run past the end of the source is rejected rather than
//! clamped, so the caller always gets exactly the cycle it asked for.

use core::f32::consts::TAU;
use libm::sinf;
use wavesmith_core::peak_magnitude;

use crate::error::{Result, WavetableError};

/// Number of samples in one wavetable cycle.
pub const WAVETABLE_LENGTH: usize = 512;

/// A mono sample source a wavetable window can be read from.
///
/// The voice never owns or manages the source; it only reads one window from
/// it at configuration time.
pub trait WavetableSource {
    /// Total number of samples available.
    fn len(&self) -> usize;

    /// True if the source holds no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `out` with samples starting at `offset`.
    ///
    /// Implementations must return an error instead of reading past their end.
    fn read(&self, offset: usize, out: &mut [f32]) -> Result<()>;
}

impl WavetableSource for [f32] {
    fn len(&self) -> usize {
        <[f32]>::len(self)
    }

    fn read(&self, offset: usize, out: &mut [f32]) -> Result<()> {
        let window = offset
            .checked_add(out.len())
            .and_then(|end| self.get(offset..end))
            .ok_or(WavetableError::WindowOutOfRange {
                offset,
                length: out.len(),
                source_len: <[f32]>::len(self),
            })?;
        out.copy_from_slice(window);
        Ok(())
    }
}

impl WavetableSource for Vec<f32> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn read(&self, offset: usize, out: &mut [f32]) -> Result<()> {
        self.as_slice().read(offset, out)
    }
}

/// One peak-normalized waveform cycle.
///
/// # Example
///
/// ```rust
/// use wavesmith_synth::{Wavetable, WAVETABLE_LENGTH};
///
/// // Two cycles of a ramp; take the second half.
/// let source: Vec<f32> = (0..2 * WAVETABLE_LENGTH)
///     .map(|i| (i % WAVETABLE_LENGTH) as f32 / WAVETABLE_LENGTH as f32 - 0.5)
///     .collect();
///
/// let table = Wavetable::from_source(&source, 0.5).unwrap();
/// assert!((table.peak() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: [f32; WAVETABLE_LENGTH],
}

impl Default for Wavetable {
    fn default() -> Self {
        Self::sine()
    }
}

impl Wavetable {
    /// A table holding exactly one cycle of a sine wave.
    pub fn sine() -> Self {
        Self::from_fn(|i| sinf(TAU * i as f32 / WAVETABLE_LENGTH as f32))
    }

    /// Build a table by evaluating `f` at every cell index.
    ///
    /// The result is used as-is; call [`Wavetable::normalized`] to rescale it.
    pub fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        Self {
            samples: core::array::from_fn(|i| f(i)),
        }
    }

    /// Cut a window out of `source` starting at `position * source.len()`
    /// and peak-normalize it.
    pub fn from_source<S>(source: &S, position: f32) -> Result<Self>
    where
        S: WavetableSource + ?Sized,
    {
        if !position.is_finite() || !(0.0..=1.0).contains(&position) {
            return Err(WavetableError::InvalidPosition(position));
        }

        let source_len = source.len();
        let offset = (source_len as f64 * f64::from(position)) as usize;
        if offset
            .checked_add(WAVETABLE_LENGTH)
            .is_none_or(|end| end > source_len)
        {
            return Err(WavetableError::WindowOutOfRange {
                offset,
                length: WAVETABLE_LENGTH,
                source_len,
            });
        }

        let mut table = Self {
            samples: [0.0; WAVETABLE_LENGTH],
        };
        source.read(offset, &mut table.samples)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(offset, source_len, "loaded wavetable window");

        table.normalized()
    }

    /// Replace this table with a window of `source`.
    ///
    /// On error the current contents are left untouched.
    pub fn load<S>(&mut self, source: &S, position: f32) -> Result<()>
    where
        S: WavetableSource + ?Sized,
    {
        *self = Self::from_source(source, position)?;
        Ok(())
    }

    /// Rescale so the largest absolute sample becomes exactly 1.0.
    pub fn normalized(mut self) -> Result<Self> {
        let peak = self.peak();
        if peak <= 0.0 || !peak.is_finite() {
            return Err(WavetableError::SilentWindow);
        }
        for sample in &mut self.samples {
            *sample /= peak;
        }
        Ok(self)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        peak_magnitude(&self.samples)
    }

    /// Read access to the cells.
    pub fn samples(&self) -> &[f32; WAVETABLE_LENGTH] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_source(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 * 0.01).sin() * 0.25).collect()
    }

    #[test]
    fn test_sine_table_is_normalized() {
        let table = Wavetable::sine();
        assert!((table.peak() - 1.0).abs() < 1e-6);
        assert_eq!(table.samples()[0], 0.0);
    }

    #[test]
    fn test_from_source_normalizes_peak() {
        let source = ramp_source(4096);
        let table = Wavetable::from_source(&source, 0.25).unwrap();
        assert!((table.peak() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_source_reads_expected_window() {
        let source: Vec<f32> = (0..1024).map(|i| i as f32).collect();
        let table = Wavetable::from_source(&source, 0.5).unwrap();
        // Window 512..1024, peak 1023
        assert!((table.samples()[0] - 512.0 / 1023.0).abs() < 1e-6);
        assert_eq!(table.samples()[WAVETABLE_LENGTH - 1], 1.0);
    }

    #[test]
    fn test_window_past_end_is_rejected() {
        let source = ramp_source(1000);
        let err = Wavetable::from_source(&source, 0.6).unwrap_err();
        assert_eq!(
            err,
            WavetableError::WindowOutOfRange {
                offset: 600,
                length: WAVETABLE_LENGTH,
                source_len: 1000,
            }
        );
    }

    #[test]
    fn test_short_source_is_rejected() {
        let source = ramp_source(100);
        assert!(matches!(
            Wavetable::from_source(&source, 0.0),
            Err(WavetableError::WindowOutOfRange { .. })
        ));
    }

    #[test]
    fn test_invalid_position_is_rejected() {
        let source = ramp_source(4096);
        for position in [-0.1, 1.5, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Wavetable::from_source(&source, position),
                Err(WavetableError::InvalidPosition(_))
            ));
        }
    }

    #[test]
    fn test_silent_window_is_rejected() {
        let source = vec![0.0f32; 2048];
        assert_eq!(
            Wavetable::from_source(&source, 0.0),
            Err(WavetableError::SilentWindow)
        );
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let mut table = Wavetable::sine();
        let before = table.clone();
        let source = vec![0.0f32; 2048];
        assert!(table.load(&source, 0.0).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_slice_source_read_bounds() {
        let source = [1.0f32, 2.0, 3.0];
        let mut out = [0.0f32; 2];
        source[..].read(1, &mut out).unwrap();
        assert_eq!(out, [2.0, 3.0]);
        assert!(source[..].read(2, &mut out).is_err());
        assert!(source[..].read(usize::MAX, &mut out).is_err());
    }
}
