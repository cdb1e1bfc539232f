use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing dependency '{package}': {hint}")]
    DependencyMissing { package: String, hint: String },

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CleanError>;
