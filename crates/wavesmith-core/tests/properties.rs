//! Property-based tests for wavesmith-core DSP primitives.
//!
//! Tests filter stability, cascade ordering and phase wrapping using proptest
//! for randomized input generation.

use proptest::prelude::*;
use wavesmith_core::{Biquad, LowpassCascade, lowpass_coefficients, rem_euclid_f32};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any valid cutoff (20-20000 Hz) and Q (0.1-10.0), low-pass biquads
    /// produce finite output for random finite input.
    #[test]
    fn biquad_stability(
        freq in 20.0f32..20000.0f32,
        q in 0.1f32..10.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut biquad = Biquad::with_coefficients(lowpass_coefficients(freq, q, 48000.0));

        for &sample in &input {
            let out = biquad.process(sample);
            prop_assert!(
                out.is_finite(),
                "Biquad (freq={}, q={}) produced non-finite output {} for input {}",
                freq, q, out, sample
            );
        }
    }

    /// Any output rate from 8 kHz to 192 kHz, oversampled by 1-8, yields a
    /// stable cascade whose output stays bounded.
    #[test]
    fn cascade_stability_across_rates(
        rate in 8000.0f32..192000.0f32,
        factor in 1usize..=8,
        input in prop::collection::vec(-1.0f32..=1.0f32, 64..256),
    ) {
        let mut bank: LowpassCascade = LowpassCascade::new(rate * factor as f32, 20_000.0);
        prop_assert!(bank.cutoff_hz() < rate * factor as f32 * 0.5);

        let mut buffer = input.clone();
        bank.process_in_place(&mut buffer);
        for &s in &buffer {
            prop_assert!(s.is_finite() && s.abs() < 8.0, "unbounded output {}", s);
        }
    }

    /// Block processing is identical to sample-by-sample processing through
    /// all stages.
    #[test]
    fn cascade_block_matches_sample_path(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..128),
    ) {
        let mut block_bank: LowpassCascade = LowpassCascade::new(192000.0, 20000.0);
        let mut sample_bank: LowpassCascade = LowpassCascade::new(192000.0, 20000.0);

        let mut buffer = input.clone();
        block_bank.process_in_place(&mut buffer);

        for (i, &x) in input.iter().enumerate() {
            let y = sample_bank.process(x);
            prop_assert!((y - buffer[i]).abs() < 1e-5, "mismatch at {}: {} vs {}", i, y, buffer[i]);
        }
    }

    /// Wrapped values always land in `[0, modulus)`.
    #[test]
    fn rem_euclid_in_range(value in -1.0e6f32..1.0e6f32) {
        let wrapped = rem_euclid_f32(value, 512.0);
        prop_assert!((0.0..512.0).contains(&wrapped), "{} wrapped to {}", value, wrapped);
    }
}
