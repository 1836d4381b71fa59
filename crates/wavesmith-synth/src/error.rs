//! Error types for wavetable configuration.

use thiserror::Error;

/// Errors raised while loading a wavetable from a source.
///
/// These only occur on the configuration path. Rendering never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WavetableError {
    /// The start position was outside `[0, 1]` or not a finite number.
    #[error("wavetable position must be a finite value in [0, 1], got {0}")]
    InvalidPosition(f32),

    /// The requested window runs past the end of the source.
    #[error(
        "wavetable window at offset {offset} with length {length} exceeds source of {source_len} samples"
    )]
    WindowOutOfRange {
        /// First source sample of the requested window.
        offset: usize,
        /// Number of samples requested.
        length: usize,
        /// Total samples available in the source.
        source_len: usize,
    },

    /// Every sample in the window is zero, so it cannot be peak-normalized.
    #[error("wavetable window is silent and cannot be normalized")]
    SilentWindow,
}

/// Convenience result type for wavetable operations.
pub type Result<T> = std::result::Result<T, WavetableError>;
