//! Monophonic wavetable voice with oversampled rendering.
//!
//! A [`WavetableVoice`] plays one note at a time. Each block is rendered at
//! [`OVERSAMPLE_FACTOR`] times the output rate, band-limited by a
//! [`LowpassCascade`], then decimated by keeping every `K`-th sample:
//!
//! ```text
//! osc @ K*fs ──► 4 x LP 20 kHz ──► keep 1 of K ──► x envelope ──► x velocity ──► mix
//! ```
//!
//! ## Note lifecycle
//!
//! ```text
//! Idle ──note_on──► Sounding ──note_off──► Releasing ──envelope done──► Idle
//! ```
//!
//! `note_on` is only honoured from idle. The voice stays playing through the
//! release tail and drops back to idle at the end of the first block in which
//! the envelope has finished. Events land on block boundaries.

use wavesmith_core::{LowpassCascade, RESAMPLE_CUTOFF_HZ, apply_gain};

use crate::buffer::OutputBuffer;
use crate::envelope::{AdsrEnvelope, AdsrParams};
use crate::error::Result;
use crate::oscillator::WavetableOscillator;
use crate::pitch::{midi_to_freq, normalize_pitch_wheel, pitch_bend_ratio};
use crate::sound::{Sound, SoundKind};
use crate::wavetable::{Wavetable, WavetableSource};

/// Integer oversampling factor used while rendering.
pub const OVERSAMPLE_FACTOR: usize = 4;

/// Output frames rendered per internal pass. Longer requests are split into
/// chunks of this size so the scratch buffers never grow.
pub const MAX_BLOCK_SIZE: usize = 512;

/// Host-facing control surface of a synthesizer voice.
///
/// Kept object safe so a host can hold a pool of `Box<dyn SynthVoice>`.
pub trait SynthVoice {
    /// True if this voice is able to play `sound`.
    fn can_play_sound(&self, sound: &Sound) -> bool;

    /// Start a note. Ignored while the voice is still playing.
    ///
    /// `velocity` is a linear gain in `[0, 1]`; `pitch_wheel` is the raw
    /// 14-bit wheel value at the moment the note starts.
    fn note_on(&mut self, note: u8, velocity: f32, pitch_wheel: u16);

    /// Release the current note. The voice keeps playing through the tail.
    fn note_off(&mut self);

    /// Update the pitch bend from a raw 14-bit wheel value.
    fn pitch_wheel_moved(&mut self, raw: u16);

    /// Continuous controller input. Does nothing unless a voice overrides it.
    fn controller_moved(&mut self, _controller: u8, _value: u8) {}

    /// Change the output sample rate. Zero and non-finite rates are ignored.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Add `num_samples` frames into every channel of `output` starting at
    /// `start_sample`. Does nothing while idle.
    fn render_block(
        &mut self,
        output: &mut dyn OutputBuffer,
        start_sample: usize,
        num_samples: usize,
    );

    /// True from `note_on` until the release tail has finished.
    fn is_playing(&self) -> bool;
}

/// Single wavetable voice.
///
/// # Example
///
/// ```rust
/// use wavesmith_synth::{AudioBuffer, SynthVoice, WavetableVoice};
///
/// let mut voice = WavetableVoice::new(48000.0);
/// voice.note_on(69, 1.0, 8192);
///
/// let mut output = AudioBuffer::new(2, 256);
/// voice.render_block(&mut output, 0, 256);
///
/// voice.note_off();
/// assert!(voice.is_playing());
/// ```
#[derive(Debug, Clone)]
pub struct WavetableVoice {
    oscillator: WavetableOscillator,
    envelope: AdsrEnvelope,
    /// Anti-aliasing bank for the oversampled stream. Replaced wholesale on a
    /// sample-rate change.
    filters: LowpassCascade,

    /// Oversampled scratch, `MAX_BLOCK_SIZE * OVERSAMPLE_FACTOR` long.
    upsampled: Vec<f32>,
    /// Decimated scratch, `MAX_BLOCK_SIZE` long.
    block: Vec<f32>,

    sample_rate: f32,
    /// Unbent note frequency in Hz.
    frequency: f32,
    velocity: f32,
    /// Normalized bend in `[-1, 1]`.
    pitch_bend: f32,
    playing: bool,
    current_note: Option<u8>,
}

impl Default for WavetableVoice {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl WavetableVoice {
    /// Create an idle voice with a sine table and default envelope.
    pub fn new(sample_rate: f32) -> Self {
        const FALLBACK_RATE: f32 = 48000.0;

        let mut voice = Self {
            oscillator: WavetableOscillator::new(FALLBACK_RATE),
            envelope: AdsrEnvelope::new(FALLBACK_RATE),
            filters: LowpassCascade::new(
                FALLBACK_RATE * OVERSAMPLE_FACTOR as f32,
                RESAMPLE_CUTOFF_HZ,
            ),
            upsampled: vec![0.0; MAX_BLOCK_SIZE * OVERSAMPLE_FACTOR],
            block: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate: FALLBACK_RATE,
            frequency: 0.0,
            velocity: 0.0,
            pitch_bend: 0.0,
            playing: false,
            current_note: None,
        };
        voice.set_sample_rate(sample_rate);
        voice
    }

    /// Change the envelope settings. Takes effect immediately, including on a
    /// sounding note.
    pub fn set_envelope(&mut self, params: AdsrParams) {
        self.envelope.set_params(params);
    }

    /// Current envelope settings.
    pub fn envelope_params(&self) -> AdsrParams {
        self.envelope.params()
    }

    /// Load the oscillator table from a window of `source`.
    ///
    /// On error the previous table stays in place.
    pub fn load_wavetable<S>(&mut self, source: &S, position: f32) -> Result<()>
    where
        S: WavetableSource + ?Sized,
    {
        self.oscillator.load_table(source, position)
    }

    /// Replace the oscillator table.
    pub fn set_wavetable(&mut self, wavetable: Wavetable) {
        self.oscillator.set_wavetable(wavetable);
    }

    /// Note currently occupying the voice.
    pub fn current_note(&self) -> Option<u8> {
        self.current_note
    }

    /// Unbent note frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Linear note gain.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Normalized pitch bend.
    pub fn pitch_bend(&self) -> f32 {
        self.pitch_bend
    }

    /// Output sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// The voice's oscillator.
    pub fn oscillator(&self) -> &WavetableOscillator {
        &self.oscillator
    }

    /// The voice's amplitude envelope.
    pub fn envelope(&self) -> &AdsrEnvelope {
        &self.envelope
    }

    /// The anti-aliasing filter bank.
    pub fn filters(&self) -> &LowpassCascade {
        &self.filters
    }

    /// Render one chunk of at most [`MAX_BLOCK_SIZE`] frames into the
    /// decimated scratch. The oscillator must already run at the oversampled
    /// rate.
    #[inline]
    fn render_chunk(&mut self, frames: usize) {
        let upsampled = &mut self.upsampled[..frames * OVERSAMPLE_FACTOR];
        self.oscillator.fill(upsampled);
        self.filters.process_in_place(upsampled);

        let block = &mut self.block[..frames];
        let groups = upsampled.chunks_exact(OVERSAMPLE_FACTOR);
        for (out, group) in block.iter_mut().zip(groups) {
            *out = group[0] * self.envelope.advance();
        }

        if self.velocity != 1.0 {
            apply_gain(block, self.velocity);
        }
    }
}

impl SynthVoice for WavetableVoice {
    fn can_play_sound(&self, sound: &Sound) -> bool {
        sound.kind() == SoundKind::Wavetable
    }

    fn note_on(&mut self, note: u8, velocity: f32, pitch_wheel: u16) {
        if self.playing {
            #[cfg(feature = "tracing")]
            tracing::debug!(note, current = ?self.current_note, "note-on ignored, voice busy");
            return;
        }

        self.frequency = midi_to_freq(note);
        self.oscillator.set_read_position(0.0);
        self.oscillator.set_frequency(self.frequency);

        self.envelope.reset();
        self.envelope.gate_on();

        // NaN fails both comparisons inside clamp, so map it to silence first
        self.velocity = if velocity.is_nan() {
            0.0
        } else {
            velocity.clamp(0.0, 1.0)
        };
        self.pitch_bend = normalize_pitch_wheel(pitch_wheel);

        self.playing = true;
        self.current_note = Some(note);

        #[cfg(feature = "tracing")]
        tracing::debug!(note, frequency = self.frequency, velocity = self.velocity, "note on");
    }

    fn note_off(&mut self) {
        self.envelope.gate_off();
    }

    fn pitch_wheel_moved(&mut self, raw: u16) {
        self.pitch_bend = normalize_pitch_wheel(raw);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(sample_rate, "ignoring invalid sample rate");
            return;
        }

        self.sample_rate = sample_rate;
        self.oscillator.set_sample_rate(sample_rate);
        self.envelope.set_sample_rate(sample_rate);
        let oversampled_rate = sample_rate * OVERSAMPLE_FACTOR as f32;
        self.filters = LowpassCascade::new(oversampled_rate, RESAMPLE_CUTOFF_HZ);
    }

    fn render_block(
        &mut self,
        output: &mut dyn OutputBuffer,
        start_sample: usize,
        num_samples: usize,
    ) {
        if !self.playing {
            return;
        }

        if self.pitch_bend != 0.0 || self.oscillator.frequency() != self.frequency {
            self.oscillator
                .set_frequency(self.frequency * pitch_bend_ratio(self.pitch_bend));
        }

        self.oscillator
            .set_sample_rate(self.sample_rate * OVERSAMPLE_FACTOR as f32);

        let channels = output.num_channels();
        let mut done = 0;
        while done < num_samples {
            let frames = (num_samples - done).min(MAX_BLOCK_SIZE);
            self.render_chunk(frames);

            let offset = start_sample.saturating_add(done);
            for channel in 0..channels {
                output.add_from(channel, offset, &self.block[..frames]);
            }
            done += frames;
        }

        self.oscillator.set_sample_rate(self.sample_rate);

        if !self.envelope.is_active() {
            #[cfg(feature = "tracing")]
            tracing::debug!(note = ?self.current_note, "voice idle");

            self.current_note = None;
            self.playing = false;
        }
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
