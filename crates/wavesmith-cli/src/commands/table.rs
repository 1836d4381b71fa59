//! Wavetable window inspection command.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use wavesmith_core::{linear_to_db, peak_magnitude};
use wavesmith_io::WavSource;
use wavesmith_synth::{WAVETABLE_LENGTH, Wavetable, WavetableSource};

/// Show the wavetable a voice would load from a WAV file.
#[derive(Args)]
pub struct TableArgs {
    /// Source WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Window start as a fraction of the source length
    #[arg(long, default_value = "0.0")]
    position: f32,
}

/// Run the table command.
pub fn run(args: TableArgs) -> anyhow::Result<()> {
    let source = WavSource::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let table = Wavetable::from_source(&source, args.position)
        .with_context(|| format!("cutting wavetable at position {}", args.position))?;

    // Same window, before normalization
    let offset = (source.len() as f64 * f64::from(args.position)) as usize;
    let mut raw = [0.0f32; WAVETABLE_LENGTH];
    source.read(offset, &mut raw)?;
    let raw_peak = peak_magnitude(&raw);

    let cells = table.samples();
    let mean = cells.iter().sum::<f32>() / WAVETABLE_LENGTH as f32;
    let rms = (cells.iter().map(|s| s * s).sum::<f32>() / WAVETABLE_LENGTH as f32).sqrt();
    let crossings = cells
        .iter()
        .zip(cells.iter().cycle().skip(1))
        .filter(|&(a, b)| (*a < 0.0) != (*b < 0.0))
        .count();

    let spec = source.spec();
    println!("File:        {}", args.input.display());
    println!(
        "Source:      {} samples, {} Hz, {} channel(s), {:.3}s",
        source.len(),
        spec.sample_rate,
        spec.channels,
        source.duration_secs()
    );
    println!(
        "Window:      {}..{} ({} samples)",
        offset,
        offset + WAVETABLE_LENGTH,
        WAVETABLE_LENGTH
    );
    println!(
        "Raw peak:    {raw_peak:.4} ({:.1} dBFS, gain {:.2}x)",
        linear_to_db(raw_peak),
        1.0 / raw_peak
    );
    println!("DC offset:   {mean:+.4}");
    println!("RMS:         {rms:.4}");
    println!("Crossings:   {crossings} per cycle");

    Ok(())
}
