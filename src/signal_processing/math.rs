use crate::error::{CleanError, Result};

/// Convert a raw signal into a dense `f64` vector
///
/// Rejects empty input and non-finite samples so that every filter
/// downstream sees a well-formed series.
pub fn as_vector<T: Copy + Into<f64>>(signal: &[T]) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Err(CleanError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    let vector: Vec<f64> = signal.iter().map(|&s| s.into()).collect();
    if let Some(index) = vector.iter().position(|s| !s.is_finite()) {
        return Err(CleanError::InvalidArgument(format!(
            "signal contains a non-finite sample at index {}",
            index
        )));
    }
    Ok(vector)
}

/// Sampling rate must be finite and strictly positive
pub fn check_sampling_rate(sampling_rate: f64) -> Result<()> {
    if sampling_rate.is_finite() && sampling_rate > 0.0 {
        Ok(())
    } else {
        Err(CleanError::InvalidArgument(format!(
            "sampling rate must be a positive number of Hz, got {}",
            sampling_rate
        )))
    }
}

/// Root-mean-square amplitude (0 for an empty slice)
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64).sqrt()
}

/// Odd-symmetric extension of `signal` by `n_pre`/`n_post` samples
///
/// Reflection is limited to the available signal (`len - 1` samples on each
/// side); anything beyond is padded with zeros.
pub fn reflect_limited_pad(signal: &[f64], n_pre: usize, n_post: usize) -> Vec<f64> {
    let n = signal.len();
    let mut padded = Vec::with_capacity(n + n_pre + n_post);
    if n == 0 {
        padded.resize(n_pre + n_post, 0.0);
        return padded;
    }

    let first = signal[0];
    let last = signal[n - 1];
    let reach = n - 1;

    let pre_reflect = n_pre.min(reach);
    padded.resize(n_pre - pre_reflect, 0.0);
    for k in (1..=pre_reflect).rev() {
        padded.push(2.0 * first - signal[k]);
    }

    padded.extend_from_slice(signal);

    let post_reflect = n_post.min(reach);
    for k in 1..=post_reflect {
        padded.push(2.0 * last - signal[n - 1 - k]);
    }
    padded.resize(n + n_pre + n_post, 0.0);
    padded
}
