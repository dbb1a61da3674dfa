use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use intonalyzer::audio::decode_audio;
use intonalyzer::cli::Cli;
use intonalyzer::intonation::{analyze, ContourPair, DEFAULT_PLACEHOLDER_LEN};
use intonalyzer::types::AudioData;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    cli.validate()
        .context("Failed to validate command-line arguments")?;
    let config = cli
        .analysis_config()
        .context("Failed to load analysis settings")?;

    let pair = match decode_inputs(&cli) {
        Ok((reference, attempt)) => {
            info!(
                reference_secs = reference.duration_secs(),
                reference_rate = reference.sample_rate,
                attempt_secs = attempt.duration_secs(),
                attempt_rate = attempt.sample_rate,
                "decoded inputs"
            );
            analyze(&reference, &attempt, &config).context("Failed to compare pitch contours")?
        }
        Err(err) if cli.fallback => {
            warn!(error = %format!("{err:#}"), "decoding failed; emitting placeholder contours");
            ContourPair::placeholder(DEFAULT_PLACEHOLDER_LEN)
        }
        Err(err) => return Err(err),
    };
    info!(frames = pair.len(), "contour pair ready");

    write_output(&cli, &pair)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn decode_inputs(cli: &Cli) -> Result<(AudioData, AudioData)> {
    let reference = decode_audio(&cli.reference).context("Failed to decode reference audio")?;
    let attempt = decode_audio(&cli.attempt).context("Failed to decode attempt audio")?;
    Ok((reference, attempt))
}

fn write_output(cli: &Cli, pair: &ContourPair) -> Result<()> {
    let json = if cli.pretty {
        serde_json::to_string_pretty(pair)
    } else {
        serde_json::to_string(pair)
    }
    .context("Failed to serialize contour pair")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write contour pair to {:?}", path))?;
            info!(path = %path.display(), "wrote contour pair");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write contour pair to stdout")?;
        }
    }
    Ok(())
}
