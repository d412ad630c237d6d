//! Parameter types for audio processors

use portable_atomic::{AtomicF32, Ordering};
use serde::{Deserialize, Serialize};

/// Parameter value (normalized 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue(f64);

impl NormalizedValue {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub const HALF: Self = Self(0.5);

    #[inline]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for NormalizedValue {
    fn default() -> Self {
        Self::HALF
    }
}

/// Atomic control value shared between the control thread and the audio callback
///
/// Loads and stores are relaxed: each parameter is read independently once
/// per block, so there is no ordering between different parameters.
#[derive(Debug)]
pub struct AtomicParam {
    value: AtomicF32,
}

impl AtomicParam {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value, Ordering::Relaxed);
    }
}

impl Default for AtomicParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Parameter range specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub skew: ParamSkew,
}

impl ParamRange {
    pub fn linear(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Linear,
        }
    }

    /// Logarithmic mapping, for frequencies. `min` must be positive.
    pub fn logarithmic(min: f64, max: f64, default: f64) -> Self {
        debug_assert!(min > 0.0, "logarithmic range needs a positive minimum");
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Logarithmic,
        }
    }

    /// Power-skewed range where the normalized midpoint lands on `centre`
    pub fn with_centre(min: f64, max: f64, centre: f64, default: f64) -> Self {
        let proportion = (centre - min) / (max - min);
        let exponent = if proportion > 0.0 && proportion < 1.0 {
            proportion.ln() / 0.5_f64.ln()
        } else {
            1.0
        };
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Exponential(exponent),
        }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Denormalize a 0-1 value to actual value
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        match self.skew {
            ParamSkew::Linear => self.min + normalized * (self.max - self.min),
            ParamSkew::Logarithmic => {
                let log_min = self.min.ln();
                let log_max = self.max.ln();
                (log_min + normalized * (log_max - log_min)).exp()
            }
            ParamSkew::Exponential(exp) => self.min + normalized.powf(exp) * (self.max - self.min),
        }
    }

    /// Normalize an actual value to 0-1
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        match self.skew {
            ParamSkew::Linear => (clamped - self.min) / (self.max - self.min),
            ParamSkew::Logarithmic => {
                let log_min = self.min.ln();
                let log_max = self.max.ln();
                (clamped.ln() - log_min) / (log_max - log_min)
            }
            ParamSkew::Exponential(exp) => {
                ((clamped - self.min) / (self.max - self.min)).powf(1.0 / exp)
            }
        }
    }
}

/// Parameter skew type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamSkew {
    Linear,
    Logarithmic,
    Exponential(f64),
}
