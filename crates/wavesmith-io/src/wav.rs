//! WAV encoding and decoding on top of `hound`.
//!
//! Everything is exchanged as `f32`. Integer PCM of any width from 8 to 32
//! bits is scaled by its full-scale magnitude on the way in and clipped on the
//! way out. A 32-bit [`WavSpec`] always means IEEE float.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// How samples are stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Signed integer PCM.
    Pcm,
    /// 32-bit IEEE float.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Int => Self::Pcm,
            SampleFormat::Float => Self::IeeeFloat,
        }
    }
}

/// Header-level facts about a WAV file.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Stored bits per sample.
    pub bits_per_sample: u16,
    /// Frames per channel.
    pub num_frames: u64,
    /// `num_frames / sample_rate`.
    pub duration_secs: f64,
    /// Stored sample encoding.
    pub format: WavFormat,
}

/// Inspect a file's header without decoding its samples.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();
    let num_frames = u64::from(reader.duration());

    Ok(WavInfo {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(header.sample_rate.max(1)),
        format: header.sample_format.into(),
    })
}

/// Layout of the audio written by [`write_wav`] and reported by [`read_wav`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// 16 or 24 for integer PCM, 32 for float.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    /// Mono, 48 kHz, float.
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    fn is_float(self) -> bool {
        self.bits_per_sample == 32
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(header: hound::WavSpec) -> Self {
        Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        let sample_format = if spec.is_float() {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        };
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format,
        }
    }
}

/// `2^(bits-1)`, the magnitude that maps to 1.0.
fn pcm_scale(bits: u16) -> Result<f32> {
    match bits {
        8..=32 => Ok(2.0f32.powi(i32::from(bits) - 1)),
        _ => Err(Error::UnsupportedFormat(format!("{bits}-bit integer PCM"))),
    }
}

/// Average each interleaved frame into one value.
fn mixdown(interleaved: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved;
    }
    let inv = 1.0 / channels as f32;
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * inv)
        .collect()
}

/// Decode a whole file to mono `f32`.
///
/// The returned [`WavSpec`] describes the file as stored, so its channel
/// count may be larger than one even though the samples are mono.
///
/// # Example
/// ```ignore
/// let (mono, spec) = read_wav("pad.wav")?;
/// assert_eq!(mono.len() as u32 / spec.sample_rate, 2);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();

    let interleaved = match header.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = pcm_scale(header.bits_per_sample)?;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((
        mixdown(interleaved, usize::from(header.channels)),
        header.into(),
    ))
}

/// Encode interleaved frames of `spec.channels` samples each.
///
/// # Example
/// ```ignore
/// let spec = WavSpec { channels: 2, bits_per_sample: 24, ..WavSpec::default() };
/// write_wav("note.wav", &buffer.to_interleaved(), spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let scale = if spec.is_float() {
        None
    } else {
        Some(pcm_scale(spec.bits_per_sample)?)
    };

    let mut writer = WavWriter::create(path, spec.into())?;
    match scale {
        None => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        Some(scale) => {
            let (lo, hi) = (-scale, scale - 1.0);
            for &sample in samples {
                writer.write_sample((sample * scale).clamp(lo, hi) as i32)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}
