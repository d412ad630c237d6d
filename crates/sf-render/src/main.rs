//! sf-render - run a WAV file through the scream filter
//!
//! Usage:
//!   sf-render in.wav out.wav --lowpass 4000 --highpass 150 --feedback-db 3
//!   sf-render in.wav out.wav --config settings.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sf_render::{RenderConfig, render_file};

#[derive(Parser)]
#[command(name = "sf-render", about = "Render a WAV file through the scream filter")]
struct Cli {
    /// Input WAV file (mono or stereo)
    input: PathBuf,

    /// Output WAV file (32-bit float)
    output: PathBuf,

    /// JSON file with render settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lowpass cutoff in Hz (accepts "4k")
    #[arg(long, value_parser = parse_frequency)]
    lowpass: Option<f32>,

    /// Highpass cutoff in Hz (accepts "1.5k")
    #[arg(long, value_parser = parse_frequency)]
    highpass: Option<f32>,

    /// Feedback gain in dB
    #[arg(long, allow_negative_numbers = true)]
    feedback_db: Option<f32>,

    /// Samples per processing block
    #[arg(short, long)]
    block_size: Option<usize>,
}

fn parse_frequency(text: &str) -> Result<f32, String> {
    let value = sf_core::text_to_value(text);
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("'{text}' is not a positive frequency"))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(hz) = cli.lowpass {
        config = config.with_lowpass(hz);
    }
    if let Some(hz) = cli.highpass {
        config = config.with_highpass(hz);
    }
    if let Some(db) = cli.feedback_db {
        config = config.with_feedback_db(db);
    }
    if let Some(size) = cli.block_size {
        config = config.with_block_size(size);
    }
    log::debug!("Render config: {config:?}");

    let report = render_file(&cli.input, &cli.output, &config).with_context(|| {
        format!(
            "rendering {} -> {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    log::info!(
        "Wrote {} ({} blocks, peak {:.3})",
        cli.output.display(),
        report.blocks,
        report.peak
    );
    Ok(())
}
