//! Loading raw signals from disk
//!
//! `.wav` files go through [`crate::wav`]; anything else is read as text
//! with one sample per line. Comma/semicolon/tab separated lines take the
//! first column, so a single-column CSV with a header works too.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::wav::read_wav_channel;

/// A loaded signal and, when the file format records it, its sampling rate
pub struct LoadedSignal {
    pub samples: Vec<f64>,
    pub sampling_rate: Option<f64>,
}

pub fn load_signal(path: impl AsRef<Path>, channel: u16) -> anyhow::Result<LoadedSignal> {
    let path = path.as_ref();
    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"));

    if is_wav {
        let wav = read_wav_channel(path, channel)
            .with_context(|| format!("Failed to read WAV file {}", path.display()))?;
        log::info!(
            "Read {} samples at {} Hz from channel {} of {}",
            wav.samples.len(),
            wav.sample_rate,
            channel,
            path.display()
        );
        return Ok(LoadedSignal {
            samples: wav.samples,
            sampling_rate: Some(wav.sample_rate as f64),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let samples = parse_text_signal(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(LoadedSignal {
        samples,
        sampling_rate: None,
    })
}

/// Parse one sample per line, skipping blanks, `#` comments and a header
pub fn parse_text_signal(content: &str) -> anyhow::Result<Vec<f64>> {
    let mut samples = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let field = line
            .split([',', ';', '\t'])
            .next()
            .unwrap_or(line)
            .trim();
        match field.parse::<f64>() {
            Ok(value) => samples.push(value),
            // Tolerate a non-numeric header before the first sample
            Err(_) if samples.is_empty() && line_no == 0 => {
                log::debug!("Skipping header line '{}'", line);
            }
            Err(_) => anyhow::bail!("line {}: '{}' is not a number", line_no + 1, field),
        }
    }
    Ok(samples)
}
