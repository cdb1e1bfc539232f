use std::path::Path;

use hound::{WavReader, WavSpec, WavWriter};

/// Samples of one channel of a WAV file, scaled to ±1 for integer formats
pub struct WavSignal {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Read `channel` (0-based) from a WAV file
pub fn read_wav_channel(path: impl AsRef<Path>, channel: u16) -> anyhow::Result<WavSignal> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if channel >= spec.channels {
        anyhow::bail!(
            "Channel {} requested but WAV file has {} channel(s)",
            channel,
            spec.channels
        );
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let samples = interleaved
        .iter()
        .skip(channel as usize)
        .step_by(spec.channels as usize)
        .copied()
        .collect();

    Ok(WavSignal {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

/// Write a mono 32-bit float WAV file
pub fn save_wav(
    path: impl AsRef<Path>,
    samples: &[f64],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    Ok(())
}
