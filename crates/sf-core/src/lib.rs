//! sf-core: Shared types, traits, and utilities for the scream filter
//!
//! This crate provides the foundational types used across all sf crates.

mod sample;
mod params;
mod text;
mod error;

pub use sample::*;
pub use params::*;
pub use text::*;
pub use error::*;

/// Processing configuration negotiated with the host before playback
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessSpec {
    pub sample_rate: f64,
    pub maximum_block_size: u32,
    pub num_channels: u32,
}

impl ProcessSpec {
    #[inline]
    pub const fn new(sample_rate: f64, maximum_block_size: u32, num_channels: u32) -> Self {
        Self {
            sample_rate,
            maximum_block_size,
            num_channels,
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.num_channels as usize
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(48000.0, 512, 2)
    }
}

/// Decibel value wrapper
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decibels(pub f64);

impl Decibels {
    pub const ZERO: Self = Self(0.0);
    pub const NEG_INF: Self = Self(f64::NEG_INFINITY);

    #[inline]
    pub fn from_gain(gain: f64) -> Self {
        if gain <= 0.0 {
            Self::NEG_INF
        } else {
            Self(20.0 * gain.log10())
        }
    }

    #[inline]
    pub fn to_gain(self) -> f64 {
        if self.0 <= -144.0 {
            0.0
        } else {
            10.0_f64.powf(self.0 / 20.0)
        }
    }
}

impl Default for Decibels {
    fn default() -> Self {
        Self::ZERO
    }
}
