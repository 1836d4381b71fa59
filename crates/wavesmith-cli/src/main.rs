//! Wavesmith CLI - Offline rendering for the wavesmith wavetable voice.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wavesmith")]
#[command(author, version, about = "Wavesmith wavetable voice CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one note through a wavetable voice to a WAV file
    Render(commands::render::RenderArgs),

    /// Inspect the wavetable window cut from a WAV file
    Table(commands::table::TableArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Table(args) => commands::table::run(args),
    }
}
