//! Render settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use sf_host::ParameterId;

use crate::{RenderError, RenderResult};

/// Control values and block size for one render
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lowpass cutoff (Hz)
    pub lowpass_hz: f32,

    /// Highpass cutoff (Hz)
    pub highpass_hz: f32,

    /// Feedback gain (dB)
    pub feedback_db: f32,

    /// Samples per processing block
    pub block_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            lowpass_hz: ParameterId::Lowpass.info().default_value(),
            highpass_hz: ParameterId::Highpass.info().default_value(),
            feedback_db: ParameterId::FeedbackGain.info().default_value(),
            block_size: 512,
        }
    }
}

impl RenderConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.block_size == 0 || self.block_size > u32::MAX as usize {
            return Err(RenderError::InvalidConfig(format!(
                "block size {} out of range",
                self.block_size
            )));
        }
        for (name, value) in [
            ("lowpass_hz", self.lowpass_hz),
            ("highpass_hz", self.highpass_hz),
            ("feedback_db", self.feedback_db),
        ] {
            if !value.is_finite() {
                return Err(RenderError::InvalidConfig(format!("{name} is not finite")));
            }
        }
        Ok(())
    }

    pub fn with_lowpass(mut self, hz: f32) -> Self {
        self.lowpass_hz = hz;
        self
    }

    pub fn with_highpass(mut self, hz: f32) -> Self {
        self.highpass_hz = hz;
        self
    }

    pub fn with_feedback_db(mut self, db: f32) -> Self {
        self.feedback_db = db;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }
}
