//! Cardswipe CLI - decode a swipe capture from a WAV file
//!
//! Reads 16-bit PCM audio (the first channel of multi-channel files), runs
//! the decode pipeline, and reports the result. Settings priority:
//! command-line arguments over the optional TOML config file over built-in
//! defaults.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use cardswipe::{Decoder, DecoderConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cardswipe
#[derive(Parser, Debug)]
#[command(name = "cardswipe")]
#[command(about = "Decode a magnetic-stripe swipe from a WAV capture")]
#[command(version)]
struct Args {
    /// WAV file containing the captured swipe (16-bit PCM)
    input: PathBuf,

    /// Optional TOML file with decoder settings
    #[arg(short, long, env = "CARDSWIPE_CONFIG")]
    config: Option<PathBuf>,

    /// Amplitude floor below which a sample is treated as silence
    #[arg(long, env = "CARDSWIPE_SILENCE_LEVEL")]
    silence_level: Option<i32>,

    /// Fraction of the average peak used as the decode threshold (0 to 1)
    #[arg(long, env = "CARDSWIPE_MIN_LEVEL_COEFF")]
    min_level_coeff: Option<f64>,

    /// Low-pass filter coefficient (0 to 1)
    #[arg(long, env = "CARDSWIPE_SMOOTHING")]
    smoothing: Option<f64>,

    /// Stretch the waveform to full range before smoothing
    #[arg(long)]
    rescale: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(good_read) => {
            if good_read {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardswipe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = load_config(&args)?;
    let decoder = Decoder::new(config).context("Invalid decoder configuration")?;

    let samples = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    info!("read {} samples from {}", samples.len(), args.input.display());

    let result = decoder
        .decode(&samples)
        .context("Decoding failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.bad_read {
        println!("bad read: no usable data recovered");
    } else {
        println!("{}", result.content);
        if let Some(method) = result.method {
            info!("decoded via {}", method);
        }
        if !result.bad_char_indices.is_empty() {
            println!(
                "suspect characters (parity faults) at: {}",
                result
                    .bad_char_indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    Ok(!result.bad_read)
}

/// Build the decoder configuration from file and command-line overrides.
fn load_config(args: &Args) -> Result<DecoderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => DecoderConfig::default(),
    };

    if let Some(level) = args.silence_level {
        config.silence_level = level;
    }
    if let Some(coeff) = args.min_level_coeff {
        config.min_level_coeff = coeff;
    }
    if let Some(smoothing) = args.smoothing {
        config.smoothing = smoothing;
    }
    if args.rescale {
        config.rescale = true;
    }
    Ok(config)
}

/// Read 16-bit PCM samples from a WAV file, first channel only.
fn read_wav(path: &PathBuf) -> Result<Vec<i16>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        bail!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    let channels = spec.channels as usize;
    let interleaved: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<_, _>>()?;
    Ok(interleaved.into_iter().step_by(channels).collect())
}
