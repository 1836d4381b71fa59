//! Output sinks a voice mixes into.
//!
//! Voices never own the output. They add their mono block into every channel
//! of whatever the host hands them, so several voices can share one buffer.

/// A multi-channel destination that accepts additive writes.
pub trait OutputBuffer {
    /// Number of channels the voice should write to.
    fn num_channels(&self) -> usize;

    /// Add `block` into `channel` starting at frame `offset`.
    ///
    /// Implementations clip the write to the channel length and ignore
    /// channels that do not exist; this is called on the audio path and must
    /// never panic.
    fn add_from(&mut self, channel: usize, offset: usize, block: &[f32]);
}

/// Sum `block` into `dest[offset..]`, dropping whatever does not fit.
#[inline]
fn mix_into(dest: &mut [f32], offset: usize, block: &[f32]) {
    let Some(dest) = dest.get_mut(offset..) else {
        return;
    };
    for (out, &sample) in dest.iter_mut().zip(block) {
        *out += sample;
    }
}

/// Owned, non-interleaved multi-channel buffer.
///
/// # Example
///
/// ```rust
/// use wavesmith_synth::{AudioBuffer, OutputBuffer};
///
/// let mut buffer = AudioBuffer::new(2, 4);
/// buffer.add_from(0, 1, &[0.5, 0.5]);
/// buffer.add_from(0, 2, &[0.25]);
/// assert_eq!(buffer.channel(0), Some(&[0.0, 0.5, 0.75, 0.0][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Allocate `num_channels` silent channels of `num_samples` frames.
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_samples]; num_channels],
        }
    }

    /// Frames per channel.
    pub fn num_samples(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Zero every channel.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    /// Read access to one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Write access to one channel.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    /// All channels in order.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Interleave the channels frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let frames = self.num_samples();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for frame in 0..frames {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }
}

impl OutputBuffer for AudioBuffer {
    fn num_channels(&self) -> usize {
        self.channels.len()
    }

    fn add_from(&mut self, channel: usize, offset: usize, block: &[f32]) {
        if let Some(dest) = self.channels.get_mut(channel) {
            mix_into(dest, offset, block);
        }
    }
}

/// A plain vector is a single-channel output.
impl OutputBuffer for Vec<f32> {
    fn num_channels(&self) -> usize {
        1
    }

    fn add_from(&mut self, channel: usize, offset: usize, block: &[f32]) {
        if channel == 0 {
            mix_into(self, offset, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates() {
        let mut buffer = AudioBuffer::new(1, 3);
        buffer.add_from(0, 0, &[1.0, 1.0, 1.0]);
        buffer.add_from(0, 0, &[0.5, 0.5, 0.5]);
        assert_eq!(buffer.channel(0), Some(&[1.5, 1.5, 1.5][..]));
    }

    #[test]
    fn add_clips_past_end() {
        let mut buffer = AudioBuffer::new(1, 4);
        buffer.add_from(0, 3, &[1.0, 2.0, 3.0]);
        buffer.add_from(0, 10, &[1.0]);
        assert_eq!(buffer.channel(0), Some(&[0.0, 0.0, 0.0, 1.0][..]));
    }

    #[test]
    fn missing_channel_is_ignored() {
        let mut buffer = AudioBuffer::new(2, 2);
        buffer.add_from(5, 0, &[1.0, 1.0]);
        assert!(buffer.channels().iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn vec_is_mono_sink() {
        let mut out = vec![0.0f32; 3];
        assert_eq!(out.num_channels(), 1);
        out.add_from(0, 1, &[1.0, 1.0]);
        out.add_from(1, 0, &[9.0]);
        assert_eq!(out, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn interleave_and_clear() {
        let mut buffer = AudioBuffer::new(2, 2);
        buffer.add_from(0, 0, &[1.0, 2.0]);
        buffer.add_from(1, 0, &[3.0, 4.0]);
        assert_eq!(buffer.to_interleaved(), vec![1.0, 3.0, 2.0, 4.0]);

        buffer.clear();
        assert_eq!(buffer.to_interleaved(), vec![0.0; 4]);
        assert_eq!(buffer.num_samples(), 2);
    }
}
