//! Error types for the scream filter crates

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum SfError {
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

}

/// Result type alias
pub type SfResult<T> = Result<T, SfError>;
