//! Note and pitch-wheel conversions.

/// Raw pitch-wheel value with no bend applied.
pub const PITCH_WHEEL_CENTER: u16 = 8192;

/// Largest raw 14-bit pitch-wheel value.
pub const PITCH_WHEEL_MAX: u16 = 16383;

/// Convert a MIDI note number to frequency in Hz (A4 = note 69 = 440 Hz).
///
/// # Example
///
/// ```rust
/// use wavesmith_synth::midi_to_freq;
///
/// assert!((midi_to_freq(69) - 440.0).abs() < 1e-3);
/// assert!((midi_to_freq(81) - 880.0).abs() < 1e-2);
/// ```
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (f32::from(note) - 69.0) / 12.0)
}

/// Map a raw 14-bit pitch-wheel value onto `[-1, 1]`.
///
/// The two halves are scaled separately: values above centre divide by the
/// 8191 steps up to [`PITCH_WHEEL_MAX`], values at or below centre by the
/// 8192 steps down to zero. Raw values above the 14-bit range are clamped.
#[inline]
pub fn normalize_pitch_wheel(raw: u16) -> f32 {
    let raw = f32::from(raw.min(PITCH_WHEEL_MAX));
    let center = f32::from(PITCH_WHEEL_CENTER);

    if raw > center {
        (raw - center) / (f32::from(PITCH_WHEEL_MAX) - center)
    } else {
        (center - raw) / -center
    }
}

/// Frequency multiplier for a normalized bend amount.
///
/// Upward bends scale linearly to an octave at `+1`; downward bends divide,
/// reaching an octave down at `-1`:
///
/// ```text
/// bend > 0:  1 + bend
/// bend <= 0: 1 / (1 - bend)
/// ```
#[inline]
pub fn pitch_bend_ratio(bend: f32) -> f32 {
    if bend > 0.0 {
        bend + 1.0
    } else {
        1.0 / (1.0 - bend)
    }
}
