//! Voice configuration for wavesmith.
//!
//! A [`VoiceConfig`] describes everything about a wavetable voice that is set
//! before playback: output sample rate, where in the source file the
//! wavetable window starts, and the amplitude envelope. It is stored as TOML.
//!
//! # Example
//!
//! ```rust,no_run
//! use wavesmith_config::VoiceConfig;
//!
//! let config = VoiceConfig::load("voice.toml").unwrap();
//! config.validate().unwrap();
//!
//! let envelope = config.envelope_params();
//! println!("attack {} ms at {} Hz", envelope.attack_ms, config.sample_rate);
//! ```

mod error;
mod voice_config;

pub use error::{ConfigError, FileOp};
pub use voice_config::{EnvelopeConfig, VoiceConfig};
