//! Offline note rendering command.

use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use wavesmith_config::VoiceConfig;
use wavesmith_core::{linear_to_db, peak_magnitude};
use wavesmith_io::{WavSource, WavSpec, write_wav};
use wavesmith_synth::{AudioBuffer, PITCH_WHEEL_CENTER, SynthVoice, WavetableVoice};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// WAV file to cut the wavetable from (built-in sine if omitted)
    #[arg(long, value_name = "WAV")]
    table: Option<PathBuf>,

    /// Voice configuration file (TOML)
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Wavetable start as a fraction of the source length (overrides config)
    #[arg(long)]
    position: Option<f32>,

    /// MIDI note number
    #[arg(long, default_value = "69", value_parser = clap::value_parser!(u8).range(0..=127))]
    note: u8,

    /// Note velocity (0-1)
    #[arg(long, default_value = "1.0")]
    velocity: f32,

    /// Raw 14-bit pitch-wheel value (8192 = no bend)
    #[arg(
        long,
        default_value_t = PITCH_WHEEL_CENTER,
        value_parser = clap::value_parser!(u16).range(0..=16383)
    )]
    bend: u16,

    /// Seconds to hold the note before releasing it
    #[arg(long, default_value = "1.0")]
    hold: f32,

    /// Longest release tail to render, in seconds
    #[arg(long, default_value = "10.0")]
    max_tail: f32,

    /// Output sample rate (overrides config)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Frames per render call
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output channels
    #[arg(long, default_value = "2")]
    channels: u16,

    /// Output bit depth (16, 24, or 32 for float)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Longest hold or release tail accepted, in seconds.
const MAX_RENDER_SECS: f32 = 3600.0;

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => VoiceConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VoiceConfig::default(),
    };
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(position) = args.position {
        config.wavetable_position = position;
    }
    config.validate()?;

    if args.block_size == 0 {
        bail!("--block-size must be at least 1");
    }
    if args.channels == 0 {
        bail!("--channels must be at least 1");
    }
    let valid_secs = |secs: f32| secs.is_finite() && (0.0..=MAX_RENDER_SECS).contains(&secs);
    if !valid_secs(args.hold) || !valid_secs(args.max_tail) {
        bail!("--hold and --max-tail must be between 0 and {MAX_RENDER_SECS} seconds");
    }

    let mut voice = WavetableVoice::new(config.sample_rate_hz());
    voice.set_envelope(config.envelope_params());

    if let Some(path) = &args.table {
        let source = WavSource::open(path)
            .with_context(|| format!("opening wavetable source {}", path.display()))?;
        voice
            .load_wavetable(&source, config.wavetable_position)
            .with_context(|| format!("cutting wavetable from {}", path.display()))?;
    }

    let sample_rate = config.sample_rate as f32;
    let hold_frames = (args.hold * sample_rate) as usize;
    let max_tail_frames = (args.max_tail * sample_rate) as usize;
    let max_frames = hold_frames.saturating_add(max_tail_frames);

    println!(
        "Rendering note {} ({:.2} Hz) at {} Hz",
        args.note,
        wavesmith_synth::midi_to_freq(args.note),
        config.sample_rate
    );

    let pb = ProgressBar::new(max_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    voice.note_on(args.note, args.velocity, args.bend);

    let mut block = AudioBuffer::new(usize::from(args.channels), args.block_size);
    let mut samples = Vec::new();
    let mut rendered = 0usize;
    let mut released = false;

    while voice.is_playing() {
        if !released && rendered >= hold_frames {
            voice.note_off();
            released = true;
            tracing::debug!(frame = rendered, "note released");
        }
        if released && rendered >= max_frames {
            tracing::warn!(
                max_tail = args.max_tail,
                "release tail still sounding, truncating output"
            );
            break;
        }

        let frames = if released {
            args.block_size
        } else {
            args.block_size.min(hold_frames - rendered)
        };

        block.clear();
        voice.render_block(&mut block, 0, frames);
        samples.extend(
            block
                .to_interleaved()
                .into_iter()
                .take(frames * usize::from(args.channels)),
        );
        rendered += frames;
        pb.set_position(rendered as u64);
    }

    pb.finish_and_clear();

    let spec = WavSpec {
        channels: args.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav(&args.output, &samples, spec)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let peak = peak_magnitude(&samples);
    println!(
        "Wrote {} ({:.3}s, {} channel(s), peak {:.1} dBFS)",
        args.output.display(),
        rendered as f32 / sample_rate,
        args.channels,
        linear_to_db(peak)
    );

    Ok(())
}
