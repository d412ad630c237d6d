//! Error types for offline rendering

use sf_core::SfError;
use thiserror::Error;

/// Offline rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Unsupported channel count: {0} (mono or stereo only)")]
    UnsupportedChannels(usize),

    #[error("Unsupported sample format: {bits}-bit {format}")]
    UnsupportedFormat { bits: u16, format: &'static str },

    #[error(transparent)]
    Core(#[from] SfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
