//! Decoded WAV files as wavetable sources.

use std::path::Path;

use wavesmith_synth::{WavetableError, WavetableSource};

use crate::wav::{WavSpec, read_wav};
use crate::{Error, Result};

/// A WAV file decoded to mono `f32`, ready to have wavetable windows cut
/// from it.
///
/// The whole file is decoded up front, so reading windows never touches the
/// filesystem.
#[derive(Debug, Clone)]
pub struct WavSource {
    samples: Vec<f32>,
    spec: WavSpec,
}

impl WavSource {
    /// Decode `path`, mixing multi-channel audio down to mono.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening wavetable source");

        let (samples, spec) = read_wav(path)?;
        let source = Self::from_samples(samples, spec)?;

        tracing::info!(
            path = %path.display(),
            samples = source.samples.len(),
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            "loaded wavetable source"
        );
        Ok(source)
    }

    /// Wrap already decoded mono samples.
    pub fn from_samples(samples: Vec<f32>, spec: WavSpec) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self { samples, spec })
    }

    /// Decoded mono samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Format of the file as stored on disk.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Length of the decoded audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.spec.sample_rate.max(1))
    }
}

impl WavetableSource for WavSource {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn read(&self, offset: usize, out: &mut [f32]) -> std::result::Result<(), WavetableError> {
        self.samples.as_slice().read(offset, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_wav;
    use tempfile::NamedTempFile;
    use wavesmith_synth::{WAVETABLE_LENGTH, Wavetable};

    #[test]
    fn test_empty_file_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[], WavSpec::default()).unwrap();
        assert!(matches!(WavSource::open(file.path()), Err(Error::Empty)));
    }

    #[test]
    fn test_window_read_through_trait() {
        let samples: Vec<f32> = (0..2000).map(|i| i as f32 / 2000.0).collect();
        let source = WavSource::from_samples(samples, WavSpec::default()).unwrap();

        let mut window = [0.0f32; 4];
        source.read(10, &mut window).unwrap();
        assert_eq!(window, [0.005, 0.0055, 0.006, 0.0065]);
        assert!(source.read(1999, &mut window).is_err());
    }

    #[test]
    fn test_table_from_opened_file() {
        let samples: Vec<f32> = (0..WAVETABLE_LENGTH * 3)
            .map(|i| 0.2 * (i as f32 * 0.05).sin())
            .collect();
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::default()).unwrap();

        let source = WavSource::open(file.path()).unwrap();
        assert_eq!(source.len(), samples.len());
        assert!((source.duration_secs() - 1536.0 / 48000.0).abs() < 1e-9);

        let table = Wavetable::from_source(&source, 0.5).unwrap();
        assert!((table.peak() - 1.0).abs() < 1e-6);
    }
}
