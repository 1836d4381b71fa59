//! Sound descriptors a host offers to its voices.

/// What kind of voice a [`Sound`] needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SoundKind {
    /// Played by [`WavetableVoice`](crate::WavetableVoice).
    #[default]
    Wavetable,
}

/// A playable sound as seen by the voice allocator.
///
/// Carries no audio data. It only tells a voice whether it is the right kind
/// of voice to play it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sound {
    kind: SoundKind,
}

impl Sound {
    /// A sound for wavetable voices.
    pub fn wavetable() -> Self {
        Self {
            kind: SoundKind::Wavetable,
        }
    }

    /// Voice kind this sound needs.
    pub fn kind(&self) -> SoundKind {
        self.kind
    }

    /// Every note maps to this sound.
    pub fn applies_to_note(&self, _note: u8) -> bool {
        true
    }

    /// Every MIDI channel maps to this sound.
    pub fn applies_to_channel(&self, _channel: u8) -> bool {
        true
    }
}
