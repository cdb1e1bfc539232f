pub mod clean;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod output;
pub mod signal_processing;
pub mod wav;

pub use clean::{AGARWAL2019, BRAINSTORM, ButterworthPreset, EogCleaner, eog_clean, mne_params};
pub use config::{CleanConfig, CleanMethod};
pub use error::{CleanError, Result};
pub use wav::save_wav;
