use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;

use eogclean::config::{CleanConfig, CleanMethod};
use eogclean::input::load_signal;
use eogclean::output::{CleanedSample, OutputFormat, create_formatter, render};
use eogclean::{EogCleaner, save_wav};

#[derive(Parser, Debug)]
#[command(name = "eogclean")]
#[command(about = "Clean a raw EOG signal for blink detection", long_about = None)]
struct Args {
    /// Input signal: WAV file, or text with one sample per line
    input: PathBuf,

    /// Cleaning method: agarwal2019 (alias agarwal), mne
    #[arg(short = 'm', long)]
    method: Option<CleanMethod>,

    /// Sampling rate in Hz (overrides the WAV header and the config file)
    #[arg(short = 'r', long)]
    sampling_rate: Option<f64>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel to read from multi-channel WAV files (0-based)
    #[arg(long, default_value_t = 0)]
    channel: u16,

    /// Output format; wav requires --output
    #[arg(short = 'f', long, value_enum, default_value = "csv")]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
    Wav,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn log_summary(label: &str, samples: &[f64]) {
    let mut stats: Stats<f64> = Stats::new();
    for &s in samples {
        stats.update(s);
    }
    log::info!(
        "{}: {} samples, mean {:.4}, std {:.4}, min {:.4}, max {:.4}",
        label,
        stats.count,
        stats.mean,
        stats.std_dev,
        stats.min,
        stats.max
    );
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => CleanConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CleanConfig::default(),
    };

    let loaded = load_signal(&args.input, args.channel)?;
    if let Some(rate) = loaded.sampling_rate {
        config.sampling_rate = rate;
    }
    if let Some(rate) = args.sampling_rate {
        config.sampling_rate = rate;
    }
    if let Some(method) = args.method {
        config.method = method;
    }

    log::info!(
        "Cleaning {} with '{}' at {} Hz",
        args.input.display(),
        config.method,
        config.sampling_rate
    );

    let cleaner = EogCleaner::new();
    let cleaned = cleaner
        .clean_with_config(&loaded.samples, &config)
        .context("Cleaning failed")?;

    log_summary("raw", &loaded.samples);
    log_summary("clean", &cleaned);

    let output_format = match args.format {
        Format::Wav => {
            let path = args
                .output
                .as_ref()
                .context("--format wav requires --output")?;
            save_wav(path, &cleaned, config.sampling_rate.round() as u32)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            return Ok(());
        }
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Csv => OutputFormat::Csv,
    };

    let rows = CleanedSample::rows(&loaded.samples, &cleaned, config.sampling_rate);
    let rendered = render(create_formatter(output_format).as_ref(), &rows);

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
