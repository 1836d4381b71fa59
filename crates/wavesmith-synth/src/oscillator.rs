//! Table-lookup oscillator with linear interpolation.
//!
//! The oscillator walks a fractional read index through a single-cycle
//! [`Wavetable`]. Each sample interpolates between the two cells around the
//! index, with the cell after the last one wrapping to the first:
//!
//! ```text
//! i      = index mod L
//! base   = floor(i)
//! next   = ceil(i) mod L
//! output = table[base] + (table[next] - table[base]) * (i - base)
//! index += frequency * L / sample_rate
//! ```
//!
//! Interpolation is plain linear, so the oscillator aliases if read directly
//! at the output rate with a bright table. The voice runs it at an oversampled
//! rate and filters the result before decimating.

use libm::ceilf;
use wavesmith_core::{lerp, rem_euclid_f32};

use crate::error::Result;
use crate::wavetable::{WAVETABLE_LENGTH, Wavetable, WavetableSource};

/// Wavetable oscillator.
///
/// # Example
///
/// ```rust
/// use wavesmith_synth::WavetableOscillator;
///
/// let mut osc = WavetableOscillator::new(48000.0);
/// osc.set_frequency(440.0);
///
/// let block: Vec<f32> = (0..64).map(|_| osc.next_sample()).collect();
/// assert_eq!(block[0], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct WavetableOscillator {
    wavetable: Wavetable,
    sample_rate: f32,
    frequency: f32,
    /// Fractional read position, wrapped into `[0, L)` before every read.
    index: f32,
    /// Cells advanced per sample.
    index_increment: f32,
}

impl Default for WavetableOscillator {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl WavetableOscillator {
    /// Create an oscillator playing a sine table at 0 Hz.
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            wavetable: Wavetable::sine(),
            sample_rate: 48000.0,
            frequency: 0.0,
            index: 0.0,
            index_increment: 0.0,
        };
        osc.set_sample_rate(sample_rate);
        osc
    }

    /// Set the rate used to derive the index increment.
    ///
    /// Zero, negative and non-finite rates are ignored. The voice calls this
    /// twice per block to switch between the output and oversampled rates.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate.is_finite() && sample_rate > 0.0 {
            self.sample_rate = sample_rate;
            self.update_increment();
        }
    }

    /// Set the frequency in Hz. Negative values are treated as 0 Hz and
    /// non-finite values are ignored.
    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency.is_finite() {
            self.frequency = frequency.max(0.0);
            self.update_increment();
        }
    }

    /// Jump the read index to `index` (in table cells).
    pub fn set_read_position(&mut self, index: f32) {
        if index.is_finite() {
            self.index = index;
        }
    }

    /// Load a new table window from `source`; see [`Wavetable::from_source`].
    ///
    /// On error the current table keeps playing.
    pub fn load_table<S>(&mut self, source: &S, position: f32) -> Result<()>
    where
        S: WavetableSource + ?Sized,
    {
        self.wavetable.load(source, position)
    }

    /// Replace the table with one built elsewhere.
    pub fn set_wavetable(&mut self, wavetable: Wavetable) {
        self.wavetable = wavetable;
    }

    /// Produce the next interpolated sample and advance the index.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        const LEN: f32 = WAVETABLE_LENGTH as f32;

        self.index = rem_euclid_f32(self.index, LEN);
        let cells = self.wavetable.samples();

        let base = self.index as usize;
        let next = (ceilf(self.index) as usize) % WAVETABLE_LENGTH;
        let weight = self.index - base as f32;

        let out = lerp(cells[base], cells[next], weight);
        self.index += self.index_increment;
        out
    }

    /// Fill `out` with consecutive samples.
    #[inline]
    pub fn fill(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Rate the increment is currently derived from.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current read index in table cells. May sit at or past `L` until the
    /// next read wraps it.
    pub fn read_position(&self) -> f32 {
        self.index
    }

    /// Cells advanced per sample.
    pub fn index_increment(&self) -> f32 {
        self.index_increment
    }

    /// The table being played.
    pub fn wavetable(&self) -> &Wavetable {
        &self.wavetable
    }

    fn update_increment(&mut self) {
        let increment = self.frequency * WAVETABLE_LENGTH as f32 / self.sample_rate;
        self.index_increment = if increment.is_finite() { increment } else { 0.0 };
    }
}
