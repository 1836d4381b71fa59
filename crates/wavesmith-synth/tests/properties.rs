//! Property-based tests for wavesmith-synth.
//!
//! Tests table wraparound, normalization, pitch-wheel mapping and render
//! safety using proptest for randomized input generation.

use proptest::prelude::*;
use wavesmith_synth::{
    AudioBuffer, PITCH_WHEEL_CENTER, SynthVoice, WAVETABLE_LENGTH, Wavetable, WavetableOscillator,
    WavetableVoice, normalize_pitch_wheel, pitch_bend_ratio,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Advancing through exactly one table length worth of increments lands
    /// back on the starting sample.
    #[test]
    fn wraparound_is_idempotent(
        shift in 0u32..8,
        start in 0usize..WAVETABLE_LENGTH,
    ) {
        // Power-of-two increments divide the table exactly and add without rounding
        let increment = (1u32 << shift) as f32;
        let steps = WAVETABLE_LENGTH / (1usize << shift);
        let sample_rate = 48000.0;

        let mut osc = WavetableOscillator::new(sample_rate);
        osc.set_wavetable(Wavetable::from_fn(|i| (i as f32 * 0.37).sin()));
        osc.set_frequency(increment * sample_rate / WAVETABLE_LENGTH as f32);
        prop_assert_eq!(osc.index_increment(), increment);

        osc.set_read_position(start as f32);
        let first = osc.next_sample();
        for _ in 1..steps {
            osc.next_sample();
        }
        prop_assert_eq!(osc.next_sample(), first);
    }

    /// Any window with a non-zero sample normalizes to a peak of exactly 1.
    #[test]
    fn loaded_table_peak_is_one(
        source in prop::collection::vec(-100.0f32..100.0f32, WAVETABLE_LENGTH..4 * WAVETABLE_LENGTH),
        position in 0.0f32..=1.0f32,
    ) {
        let offset = (source.len() as f64 * f64::from(position)) as usize;
        let window_fits = offset + WAVETABLE_LENGTH <= source.len();
        let window_silent = window_fits
            && source[offset..offset + WAVETABLE_LENGTH].iter().all(|&s| s == 0.0);

        match Wavetable::from_source(&source, position) {
            Ok(table) => {
                prop_assert!(window_fits && !window_silent);
                prop_assert!((table.peak() - 1.0).abs() < 1e-6, "peak {}", table.peak());
            }
            Err(_) => prop_assert!(!window_fits || window_silent),
        }
    }

    /// Every raw wheel value maps into `[-1, 1]`, monotonically.
    #[test]
    fn pitch_wheel_in_range(raw in 0u16..=u16::MAX) {
        let bend = normalize_pitch_wheel(raw);
        prop_assert!((-1.0..=1.0).contains(&bend));

        if raw < u16::MAX {
            prop_assert!(normalize_pitch_wheel(raw + 1) >= bend);
        }
        if raw > PITCH_WHEEL_CENTER {
            prop_assert!(bend > 0.0);
        }
    }

    /// The bend multiplier stays within one octave either way.
    #[test]
    fn bend_ratio_within_octave(bend in -1.0f32..=1.0f32) {
        let ratio = pitch_bend_ratio(bend);
        prop_assert!((0.5..=2.0).contains(&ratio), "ratio {}", ratio);
    }

    /// Rendering never produces non-finite or runaway output, whatever the
    /// block layout.
    #[test]
    fn render_output_is_bounded(
        note in 0u8..=127,
        velocity in 0.0f32..=1.0f32,
        wheel in 0u16..=16383,
        sizes in prop::collection::vec(1usize..1500, 1..6),
    ) {
        let mut voice = WavetableVoice::new(44100.0);
        voice.note_on(note, velocity, wheel);

        let total: usize = sizes.iter().sum();
        let mut output = AudioBuffer::new(2, total);
        let mut start = 0;
        for &n in &sizes {
            voice.render_block(&mut output, start, n);
            start += n;
        }

        for &s in output.channel(0).unwrap() {
            prop_assert!(s.is_finite() && s.abs() < 2.0, "sample {}", s);
        }
        prop_assert_eq!(output.channel(0), output.channel(1));
    }
}
