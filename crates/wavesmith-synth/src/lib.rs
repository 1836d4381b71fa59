//! Wavesmith Synth - Anti-aliased wavetable synthesis voice
//!
//! This crate provides a monophonic wavetable voice: a table-lookup
//! oscillator rendered at an oversampled rate, band-limited by a cascaded
//! low-pass bank from `wavesmith-core`, shaped by an ADSR envelope and mixed
//! additively into a host buffer.
//!
//! # Core Components
//!
//! ## Wavetables
//!
//! - [`Wavetable`] - One peak-normalized cycle of [`WAVETABLE_LENGTH`] samples
//! - [`WavetableSource`] - Anything a window can be cut from (slices, vectors,
//!   decoded files)
//!
//! ## Oscillator
//!
//! - [`WavetableOscillator`] - Fractional-index table reader with linear
//!   interpolation
//!
//! ```rust
//! use wavesmith_synth::WavetableOscillator;
//!
//! let mut osc = WavetableOscillator::new(48000.0);
//! osc.set_frequency(440.0);
//! let sample = osc.next_sample();
//! ```
//!
//! ## Envelope
//!
//! - [`AdsrEnvelope`] / [`AdsrParams`] - Exponential attack-decay-sustain-release
//!
//! ## Voice
//!
//! - [`SynthVoice`] - Host control surface (note on/off, pitch wheel, render)
//! - [`WavetableVoice`] - The wavetable implementation
//! - [`Sound`] / [`SoundKind`] - Descriptor used for the capability check
//! - [`OutputBuffer`] / [`AudioBuffer`] - Additive output sinks
//!
//! # Example: Render a Note
//!
//! ```rust
//! use wavesmith_synth::{AdsrParams, AudioBuffer, SynthVoice, WavetableVoice};
//!
//! let mut voice = WavetableVoice::new(48000.0);
//! voice.set_envelope(AdsrParams {
//!     attack_ms: 5.0,
//!     decay_ms: 200.0,
//!     sustain: 0.6,
//!     release_ms: 50.0,
//! });
//!
//! let source: Vec<f32> = (0..4096).map(|i| ((i % 97) as f32 / 48.5) - 1.0).collect();
//! voice.load_wavetable(&source, 0.25).unwrap();
//!
//! voice.note_on(60, 0.8, 8192);
//! let mut output = AudioBuffer::new(2, 512);
//! voice.render_block(&mut output, 0, 512);
//!
//! voice.note_off();
//! while voice.is_playing() {
//!     output.clear();
//!     voice.render_block(&mut output, 0, 512);
//! }
//! ```

pub mod buffer;
pub mod envelope;
pub mod error;
pub mod oscillator;
pub mod pitch;
pub mod sound;
pub mod voice;
pub mod wavetable;

// Re-export main types at crate root
pub use buffer::{AudioBuffer, OutputBuffer};
pub use envelope::{AdsrEnvelope, AdsrParams, EnvelopeState};
pub use error::{Result, WavetableError};
pub use oscillator::WavetableOscillator;
pub use pitch::{
    PITCH_WHEEL_CENTER, PITCH_WHEEL_MAX, midi_to_freq, normalize_pitch_wheel, pitch_bend_ratio,
};
pub use sound::{Sound, SoundKind};
pub use voice::{MAX_BLOCK_SIZE, OVERSAMPLE_FACTOR, SynthVoice, WavetableVoice};
pub use wavetable::{WAVETABLE_LENGTH, Wavetable, WavetableSource};

// Re-export the filter bank the voice is built on
pub use wavesmith_core::{LowpassCascade, NUM_RESAMPLE_FILTERS, RESAMPLE_CUTOFF_HZ};
