use crate::error::{CleanError, Result};
use crate::signal_processing::filter::{FilterBand, FilterFamily, FilterSpec, SignalFilter};
use crate::signal_processing::math::{check_sampling_rate, reflect_limited_pad};
use iir_filters::filter::{DirectForm2Transposed, Filter};
use iir_filters::filter_design::{FilterType, butter};
use iir_filters::sos::zpk2sos;

/// Butterworth IIR filter in second-order sections
///
/// Low-pass, high-pass or band-pass depending on the [`FilterBand`], run
/// through a direct form II transposed structure. State starts at zero and
/// persists across calls to [`process`](Self::process).
pub struct IirButterworth {
    filter: DirectForm2Transposed,
}

impl IirButterworth {
    /// Create a new Butterworth filter
    ///
    /// # Arguments
    /// * `band` - Cutoff frequencies in Hz
    /// * `sampling_rate` - Sample rate in Hz
    /// * `order` - Filter order (a band-pass gets twice as many poles)
    ///
    /// # Errors
    /// Returns `CleanError::FilterDesign` if filter parameters are rejected
    pub fn new(band: FilterBand, sampling_rate: f64, order: usize) -> Result<Self> {
        let filter_type = match band {
            FilterBand::LowPass(hz) => FilterType::LowPass(hz),
            FilterBand::HighPass(hz) => FilterType::HighPass(hz),
            FilterBand::BandPass(low, high) => FilterType::BandPass(low, high),
        };

        let zpk = butter(order as u32, filter_type, sampling_rate)
            .map_err(|e| CleanError::FilterDesign(format!("{:?}", e)))?;

        let sos =
            zpk2sos(&zpk, None).map_err(|e| CleanError::FilterDesign(format!("{:?}", e)))?;

        Ok(Self {
            filter: DirectForm2Transposed::new(&sos),
        })
    }

    /// Filter single sample
    pub fn process(&mut self, sample: f64) -> f64 {
        self.filter.filter(sample)
    }

    /// Filter entire buffer in-place
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Butterworth implementation of the generic filter primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct ButterworthFilter;

impl ButterworthFilter {
    /// Edge padding used by the forward-backward pass
    fn zero_phase_padding(order: usize, len: usize) -> usize {
        (3 * (2 * order + 1)).min(len.saturating_sub(1))
    }
}

impl SignalFilter for ButterworthFilter {
    fn apply(&self, signal: &[f64], sampling_rate: f64, spec: &FilterSpec) -> Result<Vec<f64>> {
        check_sampling_rate(sampling_rate)?;
        if spec.order == 0 {
            return Err(CleanError::InvalidArgument(
                "Butterworth order must be at least 1".to_string(),
            ));
        }
        let band = spec.band(sampling_rate)?;

        log::debug!(
            "Butterworth {:?} {:?}, order {}, fs {} Hz, {} samples",
            spec.family,
            band,
            spec.order,
            sampling_rate,
            signal.len()
        );

        match spec.family {
            FilterFamily::Butterworth => {
                let mut filter = IirButterworth::new(band, sampling_rate, spec.order)?;
                let mut output = signal.to_vec();
                filter.process_buffer(&mut output);
                Ok(output)
            }
            FilterFamily::ButterworthZeroPhase => {
                let pad = Self::zero_phase_padding(spec.order, signal.len());
                let mut padded = reflect_limited_pad(signal, pad, pad);

                IirButterworth::new(band, sampling_rate, spec.order)?.process_buffer(&mut padded);
                padded.reverse();
                IirButterworth::new(band, sampling_rate, spec.order)?.process_buffer(&mut padded);
                padded.reverse();

                Ok(padded[pad..pad + signal.len()].to_vec())
            }
        }
    }
}
