//! Wavesmith Core - DSP primitives for band-limited wavetable synthesis
//!
//! This crate provides the filtering building blocks the synthesis voice
//! leans on, designed for real-time audio processing with zero allocation in
//! the audio path.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR section in Direct Form I
//! - [`lowpass_coefficients`] - RBJ cookbook low-pass design, returned as
//!   normalized [`Coefficients`]
//! - [`LowpassCascade`] - `N` identical low-pass sections run back to back, used
//!   to band-limit an oversampled stream before decimation
//!
//! ## Utilities
//!
//! - Level reporting: [`linear_to_db`]
//! - Buffer helpers: [`peak_magnitude`], [`apply_gain`]
//! - Phase wrapping: [`rem_euclid_f32`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! wavesmith-core = { version = "0.1", default-features = false }
//! ```
//!
//! The optional `tracing` feature emits `debug` events when a cascade is built.
//!
//! # Example
//!
//! ```rust
//! use wavesmith_core::{LowpassCascade, RESAMPLE_CUTOFF_HZ};
//!
//! let mut bank: LowpassCascade = LowpassCascade::new(4.0 * 48000.0, RESAMPLE_CUTOFF_HZ);
//! let mut oversampled = vec![0.0f32; 2048];
//! bank.process_in_place(&mut oversampled);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod cascade;
pub mod math;

pub use biquad::{BUTTERWORTH_Q, Biquad, Coefficients, lowpass_coefficients};
pub use cascade::{LowpassCascade, NUM_RESAMPLE_FILTERS, RESAMPLE_CUTOFF_HZ};
pub use math::{
    apply_gain, flush_denormal, lerp, linear_to_db, ms_to_samples, peak_magnitude, rem_euclid_f32,
};
