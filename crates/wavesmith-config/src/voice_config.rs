//! Voice configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use wavesmith_synth::AdsrParams;

use crate::error::{ConfigError, FileOp};

/// Envelope section of a voice configuration.
///
/// Times are in milliseconds; `sustain` is a linear level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Attack time in milliseconds.
    pub attack_ms: f32,
    /// Decay time in milliseconds.
    pub decay_ms: f32,
    /// Sustain level (0.0 to 1.0).
    pub sustain: f32,
    /// Release time in milliseconds.
    pub release_ms: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        AdsrParams::default().into()
    }
}

impl From<AdsrParams> for EnvelopeConfig {
    fn from(params: AdsrParams) -> Self {
        Self {
            attack_ms: params.attack_ms,
            decay_ms: params.decay_ms,
            sustain: params.sustain,
            release_ms: params.release_ms,
        }
    }
}

impl From<EnvelopeConfig> for AdsrParams {
    fn from(config: EnvelopeConfig) -> Self {
        Self {
            attack_ms: config.attack_ms,
            decay_ms: config.decay_ms,
            sustain: config.sustain,
            release_ms: config.release_ms,
        }
    }
}

/// Configuration for one wavetable voice.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 48000
/// wavetable_position = 0.0
///
/// [envelope]
/// attack_ms = 100.0
/// decay_ms = 1000.0
/// sustain = 0.5
/// release_ms = 100.0
/// ```
///
/// Every field is optional and falls back to the defaults shown above.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Start of the wavetable window as a fraction of the source length.
    pub wavetable_position: f32,

    /// Amplitude envelope.
    pub envelope: EnvelopeConfig,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            wavetable_position: 0.0,
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl VoiceConfig {
    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the wavetable position.
    pub fn with_wavetable_position(mut self, position: f32) -> Self {
        self.wavetable_position = position;
        self
    }

    /// Set the envelope.
    pub fn with_envelope(mut self, envelope: impl Into<EnvelopeConfig>) -> Self {
        self.envelope = envelope.into();
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(FileOp::Read, path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(FileOp::Write, path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against what the voice accepts.
    ///
    /// The voice itself silently ignores or clamps bad values; validating up
    /// front turns those into errors the user can see.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::invalid("sample_rate", "must be greater than zero"));
        }

        let position = self.wavetable_position;
        if !position.is_finite() || !(0.0..=1.0).contains(&position) {
            return Err(ConfigError::invalid(
                "wavetable_position",
                format!("must be within [0, 1], got {position}"),
            ));
        }

        let env = &self.envelope;
        for (name, value) in [
            ("envelope.attack_ms", env.attack_ms),
            ("envelope.decay_ms", env.decay_ms),
            ("envelope.release_ms", env.release_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(
                    name,
                    format!("must be a positive time in milliseconds, got {value}"),
                ));
            }
        }

        if !env.sustain.is_finite() || !(0.0..=1.0).contains(&env.sustain) {
            return Err(ConfigError::invalid(
                "envelope.sustain",
                format!("must be within [0, 1], got {}", env.sustain),
            ));
        }

        Ok(())
    }

    /// Envelope settings in the form the voice takes them.
    pub fn envelope_params(&self) -> AdsrParams {
        self.envelope.into()
    }

    /// Sample rate as the voice takes it.
    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate as f32
    }
}
