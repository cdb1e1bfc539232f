use std::time::Duration;

use crate::error::{CleanError, Result};

/// Filter family understood by a [`SignalFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFamily {
    /// Butterworth IIR, single causal pass
    Butterworth,
    /// Butterworth IIR, forward-backward (zero phase, squared magnitude)
    ButterworthZeroPhase,
}

/// Band shape derived from which cutoffs are present
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterBand {
    LowPass(f64),
    HighPass(f64),
    BandPass(f64, f64),
}

/// Request for the generic band-limiting primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub family: FilterFamily,
    pub order: usize,
    /// Lower cutoff in Hz, `None` for a low-pass
    pub lowcut: Option<f64>,
    /// Upper cutoff in Hz, `None` for a high-pass
    pub highcut: Option<f64>,
}

impl FilterSpec {
    /// Resolve the band shape and check the cutoffs against Nyquist
    pub fn band(&self, sampling_rate: f64) -> Result<FilterBand> {
        let nyquist = sampling_rate / 2.0;
        let check = |name: &str, hz: f64| {
            if hz.is_finite() && hz > 0.0 && hz < nyquist {
                Ok(hz)
            } else {
                Err(CleanError::InvalidArgument(format!(
                    "{} must be between 0 and the Nyquist frequency ({} Hz), got {}",
                    name, nyquist, hz
                )))
            }
        };

        match (self.lowcut, self.highcut) {
            (None, Some(high)) => Ok(FilterBand::LowPass(check("highcut", high)?)),
            (Some(low), None) => Ok(FilterBand::HighPass(check("lowcut", low)?)),
            (Some(low), Some(high)) => {
                let low = check("lowcut", low)?;
                let high = check("highcut", high)?;
                if low >= high {
                    return Err(CleanError::InvalidArgument(format!(
                        "lowcut ({} Hz) must be below highcut ({} Hz)",
                        low, high
                    )));
                }
                Ok(FilterBand::BandPass(low, high))
            }
            (None, None) => Err(CleanError::InvalidArgument(
                "at least one of lowcut or highcut must be given".to_string(),
            )),
        }
    }
}

/// Generic digital filter primitive
///
/// Implementations return a new signal of the same length as the input.
pub trait SignalFilter: Send + Sync {
    fn apply(&self, signal: &[f64], sampling_rate: f64, spec: &FilterSpec) -> Result<Vec<f64>>;
}

/// Phase handling of a zero-phase FIR filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirPhase {
    /// Linear-phase filter with its group delay compensated
    Zero,
    /// Zero-phase filter applied forward and again on the reversed output
    ZeroDouble,
}

/// Window applied to FIR taps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirWindow {
    Hann,
    Hamming,
    Blackman,
}

/// FIR design method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirDesign {
    /// Frequency sampling of a piecewise-linear response
    Firwin2,
    /// Windowed ideal response with cutoffs at transition midpoints
    Firwin,
}

/// Parameters of a zero-phase FIR band-limiting filter
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilterParams {
    /// Lower passband edge in Hz, `None` for a low-pass
    pub l_freq: Option<f64>,
    /// Upper passband edge in Hz, `None` for a high-pass
    pub h_freq: Option<f64>,
    /// Filter length expressed as a time span
    pub filter_length: Duration,
    pub l_trans_bandwidth: f64,
    pub h_trans_bandwidth: f64,
    pub phase: FirPhase,
    pub window: FirWindow,
    pub design: FirDesign,
}

/// Optional FIR filtering backend
pub trait FirFilterBackend: Send + Sync {
    fn filter_data(
        &self,
        signal: &[f64],
        sampling_rate: f64,
        params: &FirFilterParams,
    ) -> Result<Vec<f64>>;
}
