use std::time::Duration;

use crate::error::{CleanError, Result};
use crate::signal_processing::filter::{FirDesign, FirFilterBackend, FirFilterParams};
use crate::signal_processing::fir_core::FirFilterCore;
use crate::signal_processing::firwin::{firwin, firwin2};
use crate::signal_processing::math::check_sampling_rate;

/// Built-in zero-phase FIR backend
///
/// Designs a windowed FIR band-limiting filter from [`FirFilterParams`] and
/// applies it offline without phase distortion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPhaseFir;

/// Filter length in samples for a time span, rounded up and forced odd
pub fn filter_length_samples(length: Duration, sampling_rate: f64) -> usize {
    let samples = (length.as_secs_f64() * sampling_rate).ceil().max(1.0) as usize;
    if samples.is_multiple_of(2) {
        samples + 1
    } else {
        samples
    }
}

/// Edges of the requested band after validation and transition clamping
#[derive(Debug, Clone, Copy, PartialEq)]
struct BandEdges {
    low: Option<(f64, f64)>,
    high: Option<(f64, f64)>,
    nyquist: f64,
}

impl BandEdges {
    fn new(params: &FirFilterParams, sampling_rate: f64) -> Result<Self> {
        let nyquist = sampling_rate / 2.0;
        let check_edge = |name: &str, hz: f64| {
            if hz.is_finite() && hz > 0.0 && hz < nyquist {
                Ok(())
            } else {
                Err(CleanError::InvalidArgument(format!(
                    "{} must be between 0 and the Nyquist frequency ({} Hz), got {}",
                    name, nyquist, hz
                )))
            }
        };
        let check_trans = |name: &str, hz: f64| {
            if hz.is_finite() && hz > 0.0 {
                Ok(())
            } else {
                Err(CleanError::InvalidArgument(format!(
                    "{} must be positive, got {}",
                    name, hz
                )))
            }
        };

        let low = match params.l_freq {
            Some(l) => {
                check_edge("l_freq", l)?;
                check_trans("l_trans_bandwidth", params.l_trans_bandwidth)?;
                Some((l, params.l_trans_bandwidth.min(l)))
            }
            None => None,
        };
        let high = match params.h_freq {
            Some(h) => {
                check_edge("h_freq", h)?;
                check_trans("h_trans_bandwidth", params.h_trans_bandwidth)?;
                Some((h, params.h_trans_bandwidth.min(nyquist - h)))
            }
            None => None,
        };

        match (low, high) {
            (None, None) => Err(CleanError::InvalidArgument(
                "at least one of l_freq or h_freq must be given".to_string(),
            )),
            (Some((l, _)), Some((h, _))) if l >= h => Err(CleanError::InvalidArgument(format!(
                "l_freq ({} Hz) must be below h_freq ({} Hz)",
                l, h
            ))),
            _ => Ok(Self { low, high, nyquist }),
        }
    }

    /// Gain breakpoints for frequency-sampling design
    fn breakpoints(&self) -> (Vec<f64>, Vec<f64>) {
        let mut freq = vec![0.0];
        let mut gain = vec![if self.low.is_some() { 0.0 } else { 1.0 }];

        if let Some((l, trans)) = self.low {
            let stop = l - trans;
            if stop > 0.0 {
                freq.push(stop);
                gain.push(0.0);
            }
            freq.push(l);
            gain.push(1.0);
        }

        match self.high {
            Some((h, trans)) => {
                freq.push(h);
                gain.push(1.0);
                let stop = h + trans;
                if stop < self.nyquist {
                    freq.push(stop);
                    gain.push(0.0);
                }
                freq.push(self.nyquist);
                gain.push(0.0);
            }
            None => {
                freq.push(self.nyquist);
                gain.push(1.0);
            }
        }
        (freq, gain)
    }

    /// Passband with edges at the transition midpoints, normalized to Nyquist
    fn passband(&self) -> (f64, f64) {
        let left = self
            .low
            .map_or(0.0, |(l, trans)| (l - trans / 2.0) / self.nyquist);
        let right = self
            .high
            .map_or(1.0, |(h, trans)| ((h + trans / 2.0) / self.nyquist).min(1.0));
        (left, right)
    }
}

impl ZeroPhaseFir {
    /// Design the taps for `params` at `sampling_rate`
    pub fn design(&self, sampling_rate: f64, params: &FirFilterParams) -> Result<Vec<f64>> {
        check_sampling_rate(sampling_rate)?;
        if params.filter_length.is_zero() {
            return Err(CleanError::InvalidArgument(
                "filter_length must be longer than zero".to_string(),
            ));
        }
        let edges = BandEdges::new(params, sampling_rate)?;
        let numtaps = filter_length_samples(params.filter_length, sampling_rate);

        log::debug!(
            "FIR {:?} design: {} taps, {:?} window, edges {:?}",
            params.design,
            numtaps,
            params.window,
            edges
        );

        match params.design {
            FirDesign::Firwin2 => {
                let (freq, gain) = edges.breakpoints();
                firwin2(numtaps, &freq, &gain, edges.nyquist, params.window)
            }
            FirDesign::Firwin => firwin(numtaps, &[edges.passband()], params.window),
        }
    }
}

impl FirFilterBackend for ZeroPhaseFir {
    fn filter_data(
        &self,
        signal: &[f64],
        sampling_rate: f64,
        params: &FirFilterParams,
    ) -> Result<Vec<f64>> {
        let core = FirFilterCore::new(self.design(sampling_rate, params)?);
        if core.num_taps() > signal.len() {
            log::warn!(
                "FIR filter ({} taps) is longer than the signal ({} samples); edges are dominated by padding",
                core.num_taps(),
                signal.len()
            );
        }
        Ok(core.apply(signal, params.phase))
    }
}
