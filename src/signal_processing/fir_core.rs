use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::signal_processing::filter::FirPhase;
use crate::signal_processing::math::reflect_limited_pad;

/// Linear convolution of `a` and `b` through the FFT
///
/// Returns `a.len() + b.len() - 1` samples (empty if either input is).
pub fn fft_convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let out_len = a.len() + b.len() - 1;
    let size = out_len.next_power_of_two();

    let to_complex = |x: &[f64]| -> Vec<Complex64> {
        let mut buf: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        buf.resize(size, Complex64::new(0.0, 0.0));
        buf
    };
    let mut fa = to_complex(a);
    let mut fb = to_complex(b);

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(size);
    forward.process(&mut fa);
    forward.process(&mut fb);

    for (x, y) in fa.iter_mut().zip(&fb) {
        *x *= *y;
    }
    planner.plan_fft_inverse(size).process(&mut fa);

    let scale = 1.0 / size as f64;
    fa.iter().take(out_len).map(|c| c.re * scale).collect()
}

/// Linear-phase FIR filter applied offline with its group delay removed
///
/// Holds the tap coefficients; each call pads the signal by odd reflection,
/// convolves and trims, so the output has the input's length and no lag.
pub struct FirFilterCore {
    taps: Vec<f64>,
}

impl FirFilterCore {
    /// Create a new FIR filter core with the given (symmetric) tap coefficients
    pub fn new(taps: Vec<f64>) -> Self {
        Self { taps }
    }

    /// Filter once, compensating the group delay
    pub fn apply_zero_phase(&self, signal: &[f64]) -> Vec<f64> {
        if signal.is_empty() || self.taps.is_empty() {
            return signal.to_vec();
        }
        let pad = self.taps.len() - 1;
        let padded = reflect_limited_pad(signal, pad, pad);
        let full = fft_convolve(&padded, &self.taps);

        let start = pad + self.group_delay_samples();
        full[start..start + signal.len()].to_vec()
    }

    /// Filter with the requested phase handling
    pub fn apply(&self, signal: &[f64], phase: FirPhase) -> Vec<f64> {
        match phase {
            FirPhase::Zero => self.apply_zero_phase(signal),
            FirPhase::ZeroDouble => {
                let mut once = self.apply_zero_phase(signal);
                once.reverse();
                let mut twice = self.apply_zero_phase(&once);
                twice.reverse();
                twice
            }
        }
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }
}
