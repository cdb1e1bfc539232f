//! Windowed FIR design
//!
//! `firwin2` samples a piecewise-linear gain curve on a dense frequency grid
//! and takes its inverse real FFT; `firwin` windows the ideal response of a
//! set of passbands. Both return linear-phase, symmetric taps.

use std::f64::consts::PI;

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::constants::GAIN_EPSILON;
use crate::error::{CleanError, Result};
use crate::signal_processing::filter::FirWindow;

/// Symmetric window of `len` points
pub fn window(kind: FirWindow, len: usize) -> Vec<f64> {
    if len <= 1 {
        return vec![1.0; len];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|n| {
            let phase = 2.0 * PI * n as f64 / denom;
            match kind {
                FirWindow::Hann => 0.5 - 0.5 * phase.cos(),
                FirWindow::Hamming => 0.54 - 0.46 * phase.cos(),
                FirWindow::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
            }
        })
        .collect()
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`, clamped at the ends
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    let i = xp.partition_point(|&v| v <= x) - 1;
    let (x0, x1) = (xp[i], xp[i + 1]);
    if x1 == x0 {
        return fp[i + 1];
    }
    fp[i] + (fp[i + 1] - fp[i]) * (x - x0) / (x1 - x0)
}

/// Frequency-sampling FIR design
///
/// # Arguments
/// * `numtaps` - Filter length (odd when the gain at Nyquist is non-zero)
/// * `freq` - Breakpoints in Hz, from 0 to `nyquist`, non-decreasing
/// * `gain` - Desired gain at each breakpoint
/// * `nyquist` - Nyquist frequency in Hz
/// * `window_kind` - Window applied to the truncated impulse response
pub fn firwin2(
    numtaps: usize,
    freq: &[f64],
    gain: &[f64],
    nyquist: f64,
    window_kind: FirWindow,
) -> Result<Vec<f64>> {
    if numtaps == 0 {
        return Err(CleanError::FilterDesign("numtaps must be at least 1".to_string()));
    }
    if freq.len() != gain.len() || freq.len() < 2 {
        return Err(CleanError::FilterDesign(format!(
            "freq and gain must have the same length (>= 2), got {} and {}",
            freq.len(),
            gain.len()
        )));
    }
    if freq[0] != 0.0 || freq[freq.len() - 1] != nyquist {
        return Err(CleanError::FilterDesign(format!(
            "freq must start at 0 and end at Nyquist ({} Hz)",
            nyquist
        )));
    }
    if freq.windows(2).any(|w| w[1] < w[0]) {
        return Err(CleanError::FilterDesign(
            "freq values must be non-decreasing".to_string(),
        ));
    }
    if numtaps.is_multiple_of(2) && gain[gain.len() - 1].abs() > GAIN_EPSILON {
        return Err(CleanError::FilterDesign(
            "an even-length filter must have zero gain at Nyquist".to_string(),
        ));
    }

    let nfreqs = 1 + numtaps.next_power_of_two();
    let fft_len = 2 * (nfreqs - 1);
    let delay = (numtaps - 1) as f64 / 2.0;

    let mut spectrum = vec![Complex64::new(0.0, 0.0); fft_len];
    for k in 0..nfreqs {
        let x = nyquist * k as f64 / (nfreqs - 1) as f64;
        let magnitude = interp(x, freq, gain);
        let shift = Complex64::from_polar(1.0, -delay * PI * x / nyquist);
        let value = shift * magnitude;

        if k == 0 || k == nfreqs - 1 {
            spectrum[k] = Complex64::new(value.re, 0.0);
        } else {
            spectrum[k] = value;
            spectrum[fft_len - k] = value.conj();
        }
    }

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(fft_len).process(&mut spectrum);

    let scale = 1.0 / fft_len as f64;
    let taps = spectrum
        .iter()
        .take(numtaps)
        .zip(window(window_kind, numtaps))
        .map(|(c, w)| c.re * scale * w)
        .collect();
    Ok(taps)
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Windowed-sinc FIR design
///
/// `passbands` are `(left, right)` edges normalized to Nyquist (0..=1). The
/// taps are scaled to unit gain at DC, at Nyquist, or at the centre of the
/// first passband, whichever the first band touches.
pub fn firwin(numtaps: usize, passbands: &[(f64, f64)], window_kind: FirWindow) -> Result<Vec<f64>> {
    if numtaps == 0 {
        return Err(CleanError::FilterDesign("numtaps must be at least 1".to_string()));
    }
    let Some(&(first_left, first_right)) = passbands.first() else {
        return Err(CleanError::FilterDesign("at least one passband is required".to_string()));
    };
    for &(left, right) in passbands {
        if !(0.0..=1.0).contains(&left) || !(0.0..=1.0).contains(&right) || left >= right {
            return Err(CleanError::FilterDesign(format!(
                "invalid normalized passband ({}, {})",
                left, right
            )));
        }
        if right >= 1.0 && numtaps.is_multiple_of(2) {
            return Err(CleanError::FilterDesign(
                "a filter passing Nyquist needs an odd number of taps".to_string(),
            ));
        }
    }

    let alpha = (numtaps - 1) as f64 / 2.0;
    let mut taps: Vec<f64> = (0..numtaps)
        .map(|n| {
            let m = n as f64 - alpha;
            passbands
                .iter()
                .map(|&(left, right)| right * sinc(right * m) - left * sinc(left * m))
                .sum()
        })
        .collect();

    for (tap, w) in taps.iter_mut().zip(window(window_kind, numtaps)) {
        *tap *= w;
    }

    let scale_freq = if first_left == 0.0 {
        0.0
    } else if first_right >= 1.0 {
        1.0
    } else {
        (first_left + first_right) / 2.0
    };
    let gain: f64 = taps
        .iter()
        .enumerate()
        .map(|(n, tap)| tap * (PI * (n as f64 - alpha) * scale_freq).cos())
        .sum();
    if gain.abs() < GAIN_EPSILON {
        return Err(CleanError::FilterDesign(
            "passband gain is zero; filter too short for the requested band".to_string(),
        ));
    }
    for tap in taps.iter_mut() {
        *tap /= gain;
    }
    Ok(taps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_symmetric(taps: &[f64]) {
        let n = taps.len();
        for i in 0..n / 2 {
            assert!(
                (taps[i] - taps[n - 1 - i]).abs() < 1e-9,
                "Tap {} not symmetric: {} vs {}",
                i,
                taps[i],
                taps[n - 1 - i]
            );
        }
    }

    fn response_at(taps: &[f64], normalized_freq: f64) -> f64 {
        let alpha = (taps.len() - 1) as f64 / 2.0;
        taps.iter()
            .enumerate()
            .map(|(n, t)| t * (PI * (n as f64 - alpha) * normalized_freq).cos())
            .sum()
    }

    #[test]
    fn test_windows_are_symmetric() {
        for kind in [FirWindow::Hann, FirWindow::Hamming, FirWindow::Blackman] {
            let w = window(kind, 31);
            assert_eq!(w.len(), 31);
            assert_symmetric(&w);
            assert_relative_eq!(w[15], 1.0, epsilon = 1e-12);
        }
        let hann = window(FirWindow::Hann, 9);
        assert_relative_eq!(hann[0], 0.0, epsilon = 1e-12);
        assert_eq!(window(FirWindow::Hann, 1), vec![1.0]);
    }

    #[test]
    fn test_interp_clamps_and_interpolates() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 1.0, 1.0];
        assert_relative_eq!(interp(0.5, &xp, &fp), 0.5);
        assert_relative_eq!(interp(1.5, &xp, &fp), 1.0);
        assert_relative_eq!(interp(-1.0, &xp, &fp), 0.0);
        assert_relative_eq!(interp(3.0, &xp, &fp), 1.0);
    }

    #[test]
    fn test_firwin2_lowpass() {
        let taps = firwin2(
            201,
            &[0.0, 10.0, 15.0, 50.0],
            &[1.0, 1.0, 0.0, 0.0],
            50.0,
            FirWindow::Hann,
        )
        .unwrap();
        assert_eq!(taps.len(), 201);
        assert_symmetric(&taps);
        assert_relative_eq!(response_at(&taps, 0.0), 1.0, epsilon = 0.02);
        assert!(response_at(&taps, 0.6).abs() < 0.01);
    }

    #[test]
    fn test_firwin2_bandpass() {
        let taps = firwin2(
            1001,
            &[0.0, 0.5, 1.0, 10.0, 10.5, 50.0],
            &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
            50.0,
            FirWindow::Hann,
        )
        .unwrap();
        assert_symmetric(&taps);
        assert!(response_at(&taps, 0.0).abs() < 0.05);
        assert_relative_eq!(response_at(&taps, 0.1), 1.0, epsilon = 0.02);
        assert!(response_at(&taps, 0.4).abs() < 0.01);
    }

    #[test]
    fn test_firwin2_rejects_bad_breakpoints() {
        let hann = FirWindow::Hann;
        assert!(firwin2(11, &[0.0, 40.0], &[1.0, 0.0], 50.0, hann).is_err());
        assert!(firwin2(11, &[0.0, 30.0, 20.0, 50.0], &[1.0; 4], 50.0, hann).is_err());
        assert!(firwin2(11, &[0.0, 50.0], &[1.0], 50.0, hann).is_err());
        assert!(firwin2(10, &[0.0, 50.0], &[1.0, 1.0], 50.0, hann).is_err());
        assert!(firwin2(0, &[0.0, 50.0], &[1.0, 0.0], 50.0, hann).is_err());
    }

    #[test]
    fn test_firwin_lowpass_unit_dc_gain() {
        let taps = firwin(101, &[(0.0, 0.2)], FirWindow::Hamming).unwrap();
        assert_symmetric(&taps);
        assert_relative_eq!(taps.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(response_at(&taps, 0.5).abs() < 0.01);
    }

    #[test]
    fn test_firwin_highpass_unit_nyquist_gain() {
        let taps = firwin(101, &[(0.3, 1.0)], FirWindow::Blackman).unwrap();
        assert_relative_eq!(response_at(&taps, 1.0), 1.0, epsilon = 1e-9);
        assert!(response_at(&taps, 0.0).abs() < 0.01);
        assert!(firwin(100, &[(0.3, 1.0)], FirWindow::Blackman).is_err());
    }

    #[test]
    fn test_firwin_bandpass_unit_center_gain() {
        let taps = firwin(301, &[(0.1, 0.3)], FirWindow::Hann).unwrap();
        assert_relative_eq!(response_at(&taps, 0.2), 1.0, epsilon = 1e-9);
    }
}
