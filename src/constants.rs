//! Preset parameters and numeric constants
//!
//! Cutoffs are in Hz. The FIR values describe the zero-phase band-pass used
//! by the "mne" preset.

/// Default sampling rate assumed when none is given (Hz).
pub const DEFAULT_SAMPLING_RATE: f64 = 1000.0;

/// Butterworth order shared by the agarwal2019 and brainstorm presets.
pub const BUTTERWORTH_PRESET_ORDER: usize = 4;

/// Low-pass cutoff of the agarwal2019 preset.
pub const AGARWAL2019_HIGHCUT_HZ: f64 = 10.0;

/// Band edges of the (inactive) brainstorm preset.
pub const BRAINSTORM_LOWCUT_HZ: f64 = 1.5;
pub const BRAINSTORM_HIGHCUT_HZ: f64 = 15.0;

/// Band edges of the mne preset.
pub const MNE_L_FREQ_HZ: f64 = 1.0;
pub const MNE_H_FREQ_HZ: f64 = 10.0;

/// Transition bandwidth on each edge of the mne band-pass.
pub const MNE_TRANS_BANDWIDTH_HZ: f64 = 0.5;

/// FIR filter length of the mne preset, in seconds.
pub const MNE_FILTER_LENGTH_SECS: f64 = 10.0;

/// Name of the cargo feature providing the zero-phase FIR backend.
pub const FIR_BACKEND_FEATURE: &str = "zero-phase-fir";

/// Smallest magnitude treated as non-zero when normalizing FIR gain.
pub const GAIN_EPSILON: f64 = 1e-12;
