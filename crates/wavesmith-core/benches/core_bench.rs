//! Criterion benchmarks for wavesmith-core DSP primitives
//!
//! Run with: cargo bench -p wavesmith-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use wavesmith_core::{Biquad, LowpassCascade, RESAMPLE_CUTOFF_HZ, lowpass_coefficients};

const SAMPLE_RATE: f32 = 48000.0;
const OVERSAMPLE: usize = 4;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize, sample_rate: f32) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("Biquad");

    let coeffs = lowpass_coefficients(1000.0, 0.707, SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size, SAMPLE_RATE);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut biquad = Biquad::with_coefficients(coeffs);
                b.iter(|| {
                    for &sample in &input {
                        black_box(biquad.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.bench_function("coefficient_calc", |b| {
        b.iter(|| {
            black_box(lowpass_coefficients(
                black_box(1000.0),
                black_box(0.707),
                black_box(SAMPLE_RATE),
            ))
        });
    });

    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("LowpassCascade");
    let rate = SAMPLE_RATE * OVERSAMPLE as f32;

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size * OVERSAMPLE, rate);

        group.bench_with_input(
            BenchmarkId::new("process_in_place_4x", block_size),
            &block_size,
            |b, _| {
                let mut bank: LowpassCascade = LowpassCascade::new(rate, RESAMPLE_CUTOFF_HZ);
                let mut buffer = input.clone();
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    bank.process_in_place(black_box(&mut buffer));
                });
            },
        );
    }

    group.bench_function("rebuild", |b| {
        b.iter(|| {
            let bank: LowpassCascade = LowpassCascade::new(black_box(rate), RESAMPLE_CUTOFF_HZ);
            black_box(bank)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_biquad, bench_cascade);
criterion_main!(benches);
