#![allow(dead_code)]

use std::f64::consts::PI;

/// Pure sine tone
pub fn sine(freq_hz: f64, sampling_rate: f64, duration_secs: f64, amplitude: f64) -> Vec<f64> {
    let n = (duration_secs * sampling_rate) as usize;
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sampling_rate).sin())
        .collect()
}

/// Synthetic vertical EOG: Gaussian blinks on a flat baseline
///
/// Each blink peaks at `amplitude` at its time (seconds) with a standard
/// deviation of 50 ms.
pub fn blink_train(
    sampling_rate: f64,
    duration_secs: f64,
    blink_times: &[f64],
    amplitude: f64,
) -> Vec<f64> {
    let n = (duration_secs * sampling_rate) as usize;
    let sigma = 0.05;
    (0..n)
        .map(|i| {
            let t = i as f64 / sampling_rate;
            blink_times
                .iter()
                .map(|&center| amplitude * (-(t - center).powi(2) / (2.0 * sigma * sigma)).exp())
                .sum()
        })
        .collect()
}

pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Index of the largest sample in `signal[start..end]`
pub fn argmax(signal: &[f64], start: usize, end: usize) -> usize {
    let mut best = start;
    for i in start..end {
        if signal[i] > signal[best] {
            best = i;
        }
    }
    best
}
