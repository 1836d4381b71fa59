//! Error types for voice configuration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a config file.
    Read,
    /// Writing a config file.
    Write,
    /// Creating the directory a config is saved into.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Anything that can go wrong between a TOML file and a usable voice setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The filesystem refused a read, write or mkdir.
    #[error("could not {op} '{path}': {source}")]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for a [`VoiceConfig`](crate::VoiceConfig).
    #[error("malformed voice config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Serialization failed while saving.
    #[error("could not encode voice config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A field holds a value the voice cannot use.
    #[error("invalid parameter '{field}': {reason}")]
    InvalidParameter {
        /// Dotted name of the offending field, e.g. `envelope.sustain`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Build an [`InvalidParameter`](ConfigError::InvalidParameter) error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
