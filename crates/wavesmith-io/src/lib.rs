//! WAV file I/O for wavesmith.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`], [`read_wav_info`] and [`write_wav`]
//! - **Wavetable sources**: [`WavSource`], a decoded mono file that a
//!   [`Wavetable`](wavesmith_synth::Wavetable) window can be cut from
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wavesmith_io::{WavSource, WavSpec, write_wav};
//! use wavesmith_synth::{AudioBuffer, SynthVoice, WavetableVoice};
//!
//! let source = WavSource::open("pad.wav")?;
//!
//! let mut voice = WavetableVoice::new(48000.0);
//! voice.load_wavetable(&source, 0.3)?;
//! voice.note_on(60, 1.0, 8192);
//!
//! let mut output = AudioBuffer::new(1, 48000);
//! voice.render_block(&mut output, 0, 48000);
//! write_wav("note.wav", &output.to_interleaved(), WavSpec::default())?;
//! ```

mod source;
mod wav;

pub use source::WavSource;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for WAV I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file decoded to zero samples.
    #[error("WAV file contains no samples")]
    Empty,

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience result type for WAV I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
