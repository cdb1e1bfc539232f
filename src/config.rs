//! Configuration for EOG cleaning.
//!
//! The cleaning method is selected by a case-insensitive string at the
//! boundary (CLI flag, TOML file, library call) and carried as the closed
//! [`CleanMethod`] enum from there on.
//!
//! ```
//! use eogclean::config::{CleanConfig, CleanMethod};
//!
//! let config = CleanConfig::from_toml_str("sampling_rate = 250.0\nmethod = \"MNE\"").unwrap();
//! assert_eq!(config.method, CleanMethod::Mne);
//! assert_eq!(config.sampling_rate, 250.0);
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SAMPLING_RATE;
use crate::error::{CleanError, Result};
use crate::signal_processing::math::check_sampling_rate;

/// Options listed in the error raised for an unknown method.
pub const VALID_METHODS: &str = "'agarwal2019', 'mne'";

/// EOG cleaning method
///
/// # Parsing formats
/// - `agarwal2019` or `agarwal` - 4th order Butterworth low-pass at 10 Hz
/// - `mne` - zero-phase FIR band-pass 1-10 Hz
///
/// Matching ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CleanMethod {
    /// Agarwal & Sivakumar (2019) blink-detection preprocessing
    #[default]
    Agarwal2019,
    /// Default EOG filtering of the MNE toolbox (needs the FIR backend)
    Mne,
}

impl CleanMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanMethod::Agarwal2019 => "agarwal2019",
            CleanMethod::Mne => "mne",
        }
    }
}

impl fmt::Display for CleanMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanMethod {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "agarwal" | "agarwal2019" => Ok(CleanMethod::Agarwal2019),
            "mne" => Ok(CleanMethod::Mne),
            _ => Err(CleanError::InvalidArgument(format!(
                "eog_clean(): 'method' should be one of {} (got '{}')",
                VALID_METHODS, s
            ))),
        }
    }
}

impl TryFrom<String> for CleanMethod {
    type Error = CleanError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CleanMethod> for String {
    fn from(method: CleanMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Cleaning configuration
///
/// Missing keys fall back to [`CleanConfig::default`]: 1000 Hz and
/// `agarwal2019`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    /// Sampling rate of the raw signal in Hz
    pub sampling_rate: f64,
    /// Cleaning method to apply
    pub method: CleanMethod,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            sampling_rate: DEFAULT_SAMPLING_RATE,
            method: CleanMethod::default(),
        }
    }
}

impl CleanConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CleanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CleanError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CleanError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        check_sampling_rate(self.sampling_rate)
            .map_err(|e| CleanError::Config(e.to_string()))
    }
}
