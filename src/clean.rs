//! EOG cleaning
//!
//! Prepares a raw EOG channel for blink detection by band-limiting it with
//! one of the cleaning presets:
//!
//! | Method | Filter | Band |
//! |---|---|---|
//! | `agarwal2019` | 4th order Butterworth, causal | low-pass 10 Hz |
//! | `mne` | zero-phase FIR (firwin2, Hann, 10 s, zero-double) | 1-10 Hz |
//!
//! The brainstorm preset (Butterworth band-pass 1.5-15 Hz) is kept as the
//! [`BRAINSTORM`] constant but is not selectable by name.
//!
//! ```
//! let signal: Vec<f64> = (0..2000).map(|i| (i as f64 / 100.0).sin()).collect();
//! let cleaned = eogclean::eog_clean(&signal, 1000.0, "agarwal2019").unwrap();
//! assert_eq!(cleaned.len(), signal.len());
//! ```

use std::time::Duration;

use crate::config::{CleanConfig, CleanMethod};
use crate::constants::{
    AGARWAL2019_HIGHCUT_HZ, BRAINSTORM_HIGHCUT_HZ, BRAINSTORM_LOWCUT_HZ,
    BUTTERWORTH_PRESET_ORDER, FIR_BACKEND_FEATURE, MNE_FILTER_LENGTH_SECS, MNE_H_FREQ_HZ,
    MNE_L_FREQ_HZ, MNE_TRANS_BANDWIDTH_HZ,
};
use crate::error::{CleanError, Result};
use crate::signal_processing::math::{as_vector, check_sampling_rate};
use crate::signal_processing::{
    ButterworthFilter, FilterFamily, FilterSpec, FirDesign, FirFilterBackend, FirFilterParams,
    FirPhase, FirWindow, SignalFilter,
};

/// Named configuration of the generic Butterworth primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterworthPreset {
    pub name: &'static str,
    pub family: FilterFamily,
    pub order: usize,
    pub lowcut: Option<f64>,
    pub highcut: Option<f64>,
}

impl ButterworthPreset {
    pub fn spec(&self) -> FilterSpec {
        FilterSpec {
            family: self.family,
            order: self.order,
            lowcut: self.lowcut,
            highcut: self.highcut,
        }
    }
}

/// Agarwal & Sivakumar (2019), "Blink: A Fully Automated Unsupervised
/// Algorithm for Eye-Blink Detection in EEG Signals"
pub const AGARWAL2019: ButterworthPreset = ButterworthPreset {
    name: "agarwal2019",
    family: FilterFamily::Butterworth,
    order: BUTTERWORTH_PRESET_ORDER,
    lowcut: None,
    highcut: Some(AGARWAL2019_HIGHCUT_HZ),
};

/// Default EOG filtering of the Brainstorm toolbox (not selectable by name)
pub const BRAINSTORM: ButterworthPreset = ButterworthPreset {
    name: "brainstorm",
    family: FilterFamily::Butterworth,
    order: BUTTERWORTH_PRESET_ORDER,
    lowcut: Some(BRAINSTORM_LOWCUT_HZ),
    highcut: Some(BRAINSTORM_HIGHCUT_HZ),
};

/// FIR parameters of the `mne` preset
pub fn mne_params() -> FirFilterParams {
    FirFilterParams {
        l_freq: Some(MNE_L_FREQ_HZ),
        h_freq: Some(MNE_H_FREQ_HZ),
        filter_length: Duration::from_secs_f64(MNE_FILTER_LENGTH_SECS),
        l_trans_bandwidth: MNE_TRANS_BANDWIDTH_HZ,
        h_trans_bandwidth: MNE_TRANS_BANDWIDTH_HZ,
        phase: FirPhase::ZeroDouble,
        window: FirWindow::Hann,
        design: FirDesign::Firwin2,
    }
}

#[cfg(feature = "zero-phase-fir")]
fn default_fir_backend() -> Option<Box<dyn FirFilterBackend>> {
    Some(Box::new(crate::signal_processing::ZeroPhaseFir))
}

#[cfg(not(feature = "zero-phase-fir"))]
fn default_fir_backend() -> Option<Box<dyn FirFilterBackend>> {
    None
}

/// EOG cleaning dispatcher
///
/// Holds the generic filter primitive and, optionally, the FIR backend that
/// the `mne` method needs. Immutable once built, so one cleaner can serve
/// any number of calls or threads.
pub struct EogCleaner {
    filter: Box<dyn SignalFilter>,
    fir_backend: Option<Box<dyn FirFilterBackend>>,
}

impl Default for EogCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl EogCleaner {
    /// Butterworth primitive plus the built-in FIR backend when the
    /// `zero-phase-fir` feature is enabled
    pub fn new() -> Self {
        Self {
            filter: Box::new(ButterworthFilter),
            fir_backend: default_fir_backend(),
        }
    }

    pub fn with_signal_filter(mut self, filter: impl SignalFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn with_fir_backend(mut self, backend: impl FirFilterBackend + 'static) -> Self {
        self.fir_backend = Some(Box::new(backend));
        self
    }

    pub fn without_fir_backend(mut self) -> Self {
        self.fir_backend = None;
        self
    }

    pub fn has_fir_backend(&self) -> bool {
        self.fir_backend.is_some()
    }

    /// Clean `signal` with `method`
    ///
    /// Returns a new signal with the same length and ordering.
    ///
    /// # Errors
    /// * `InvalidArgument` - bad sampling rate or non-finite samples
    /// * `InsufficientData` - empty signal
    /// * `DependencyMissing` - `Mne` requested without a FIR backend
    pub fn clean<T: Copy + Into<f64>>(
        &self,
        signal: &[T],
        sampling_rate: f64,
        method: CleanMethod,
    ) -> Result<Vec<f64>> {
        check_sampling_rate(sampling_rate)?;
        let signal = as_vector(signal)?;

        log::debug!(
            "Cleaning {} samples at {} Hz with '{}'",
            signal.len(),
            sampling_rate,
            method
        );

        match method {
            CleanMethod::Agarwal2019 => self.apply_preset(&signal, sampling_rate, &AGARWAL2019),
            CleanMethod::Mne => self.clean_mne(&signal, sampling_rate),
        }
    }

    /// Clean with a method given by name (case-insensitive)
    pub fn clean_str<T: Copy + Into<f64>>(
        &self,
        signal: &[T],
        sampling_rate: f64,
        method: &str,
    ) -> Result<Vec<f64>> {
        let method: CleanMethod = method.parse()?;
        self.clean(signal, sampling_rate, method)
    }

    pub fn clean_with_config<T: Copy + Into<f64>>(
        &self,
        signal: &[T],
        config: &CleanConfig,
    ) -> Result<Vec<f64>> {
        self.clean(signal, config.sampling_rate, config.method)
    }

    /// Apply any Butterworth preset directly, bypassing method selection
    pub fn clean_with_preset<T: Copy + Into<f64>>(
        &self,
        signal: &[T],
        sampling_rate: f64,
        preset: &ButterworthPreset,
    ) -> Result<Vec<f64>> {
        check_sampling_rate(sampling_rate)?;
        let signal = as_vector(signal)?;
        self.apply_preset(&signal, sampling_rate, preset)
    }

    fn apply_preset(
        &self,
        signal: &[f64],
        sampling_rate: f64,
        preset: &ButterworthPreset,
    ) -> Result<Vec<f64>> {
        log::debug!("Applying preset '{}'", preset.name);
        self.filter.apply(signal, sampling_rate, &preset.spec())
    }

    fn clean_mne(&self, signal: &[f64], sampling_rate: f64) -> Result<Vec<f64>> {
        let backend = self
            .fir_backend
            .as_deref()
            .ok_or_else(|| CleanError::DependencyMissing {
                package: FIR_BACKEND_FEATURE.to_string(),
                hint: format!(
                    "the 'mne' method requires the zero-phase FIR backend; please install it first \
                     (`cargo build --features {}`) or supply one with EogCleaner::with_fir_backend",
                    FIR_BACKEND_FEATURE
                ),
            })?;
        backend.filter_data(signal, sampling_rate, &mne_params())
    }
}

/// Clean a raw EOG signal
///
/// `method` is one of `agarwal2019` (alias `agarwal`) or `mne`, in any case.
pub fn eog_clean<T: Copy + Into<f64>>(
    signal: &[T],
    sampling_rate: f64,
    method: &str,
) -> Result<Vec<f64>> {
    EogCleaner::new().clean_str(signal, sampling_rate, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records what it was asked to do and returns the input unchanged
    #[derive(Default)]
    struct RecordingFilter {
        specs: Mutex<Vec<FilterSpec>>,
    }

    impl SignalFilter for RecordingFilter {
        fn apply(&self, signal: &[f64], _: f64, spec: &FilterSpec) -> Result<Vec<f64>> {
            self.specs.lock().unwrap().push(*spec);
            Ok(signal.to_vec())
        }
    }

    impl SignalFilter for Arc<RecordingFilter> {
        fn apply(&self, signal: &[f64], rate: f64, spec: &FilterSpec) -> Result<Vec<f64>> {
            self.as_ref().apply(signal, rate, spec)
        }
    }

    #[derive(Default)]
    struct RecordingFir {
        params: Mutex<Option<(f64, FirFilterParams)>>,
    }

    impl FirFilterBackend for Arc<RecordingFir> {
        fn filter_data(
            &self,
            signal: &[f64],
            sampling_rate: f64,
            params: &FirFilterParams,
        ) -> Result<Vec<f64>> {
            *self.params.lock().unwrap() = Some((sampling_rate, params.clone()));
            Ok(signal.iter().map(|x| x * 0.5).collect())
        }
    }

    #[test]
    fn test_preset_values() {
        assert_eq!(AGARWAL2019.order, 4);
        assert_eq!(AGARWAL2019.lowcut, None);
        assert_eq!(AGARWAL2019.highcut, Some(10.0));
        assert_eq!(AGARWAL2019.family, FilterFamily::Butterworth);

        assert_eq!(BRAINSTORM.lowcut, Some(1.5));
        assert_eq!(BRAINSTORM.highcut, Some(15.0));

        let mne = mne_params();
        assert_eq!(mne.l_freq, Some(1.0));
        assert_eq!(mne.h_freq, Some(10.0));
        assert_eq!(mne.filter_length, Duration::from_secs(10));
        assert_eq!(mne.l_trans_bandwidth, 0.5);
        assert_eq!(mne.h_trans_bandwidth, 0.5);
        assert_eq!(mne.phase, FirPhase::ZeroDouble);
        assert_eq!(mne.window, FirWindow::Hann);
        assert_eq!(mne.design, FirDesign::Firwin2);
    }

    #[test]
    fn test_agarwal_forwards_preset_to_filter() {
        let recorder = Arc::new(RecordingFilter::default());
        let cleaner = EogCleaner::new().with_signal_filter(recorder.clone());

        let output = cleaner
            .clean_str(&[1.0f32, 2.0, 3.0], 250.0, "Agarwal")
            .unwrap();
        assert_eq!(output, vec![1.0, 2.0, 3.0]);
        assert_eq!(*recorder.specs.lock().unwrap(), vec![AGARWAL2019.spec()]);
    }

    #[test]
    fn test_brainstorm_reachable_through_preset_only() {
        let recorder = Arc::new(RecordingFilter::default());
        let cleaner = EogCleaner::new().with_signal_filter(recorder.clone());

        assert!(cleaner.clean_str(&[0.0; 4], 100.0, "brainstorm").is_err());
        cleaner
            .clean_with_preset(&[0.0; 4], 100.0, &BRAINSTORM)
            .unwrap();
        assert_eq!(*recorder.specs.lock().unwrap(), vec![BRAINSTORM.spec()]);
    }

    #[test]
    fn test_mne_uses_injected_backend() {
        let recorder = Arc::new(RecordingFir::default());
        let cleaner = EogCleaner::new()
            .without_fir_backend()
            .with_fir_backend(recorder.clone());
        assert!(cleaner.has_fir_backend());

        let output = cleaner.clean(&[2i32, 4, 6], 100.0, CleanMethod::Mne).unwrap();
        assert_eq!(output, vec![1.0, 2.0, 3.0]);

        let (rate, params) = recorder.params.lock().unwrap().clone().unwrap();
        assert_eq!(rate, 100.0);
        assert_eq!(params, mne_params());
    }

    #[test]
    fn test_mne_without_backend_is_dependency_missing() {
        let cleaner = EogCleaner::new().without_fir_backend();
        assert!(!cleaner.has_fir_backend());

        match cleaner.clean(&[0.0; 16], 100.0, CleanMethod::Mne) {
            Err(CleanError::DependencyMissing { package, hint }) => {
                assert_eq!(package, "zero-phase-fir");
                assert!(hint.contains("install"), "{}", hint);
            }
            other => panic!("Expected DependencyMissing, got {:?}", other),
        }

        // Other methods still work without the backend
        assert!(cleaner.clean(&[0.0; 16], 100.0, CleanMethod::Agarwal2019).is_ok());
    }

    #[test]
    fn test_invalid_method_checked_before_signal() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            EogCleaner::new().clean_str(&empty, 100.0, "foo"),
            Err(CleanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_bad_sampling_rate() {
        assert!(matches!(
            eog_clean(&[1.0, 2.0], 0.0, "agarwal2019"),
            Err(CleanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_clean_with_config() {
        let recorder = Arc::new(RecordingFir::default());
        let cleaner = EogCleaner::new().with_fir_backend(recorder.clone());
        let config = CleanConfig {
            sampling_rate: 128.0,
            method: CleanMethod::Mne,
        };
        cleaner.clean_with_config(&[1.0; 8], &config).unwrap();
        assert_eq!(recorder.params.lock().unwrap().as_ref().unwrap().0, 128.0);
    }
}
