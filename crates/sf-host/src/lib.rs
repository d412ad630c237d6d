//! sf-host: the audio-processor side of the scream filter
//!
//! Owns the three user controls and drives [`sf_dsp::ScreamFilter`] once per
//! host block. Control values live in relaxed atomics so a UI or automation
//! thread can write them while the audio callback reads them.

mod params;
mod processor;

pub use params::*;
pub use processor::*;

/// Processor display name
pub const PLUGIN_NAME: &str = "ScreamFilter";
