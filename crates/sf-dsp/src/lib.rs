//! sf-dsp: DSP processors for the scream filter
//!
//! ## Modules
//! - `biquad` - TDF-II biquad filters (lowpass, highpass)
//! - `saturation` - tanh soft clipping
//! - `scream` - per-channel scream filter unit and the multichannel bank

pub mod biquad;
pub mod saturation;
pub mod scream;

pub use scream::{ScreamFilter, SingleChannelScreamFilter};

use sf_core::Sample;

/// Trait for all DSP processors
pub trait Processor: Send + Sync {
    /// Reset processor state
    fn reset(&mut self);

    /// Get latency in samples
    fn latency(&self) -> usize {
        0
    }
}

/// Mono processor trait
pub trait MonoProcessor: Processor {
    /// Process a single sample
    fn process_sample(&mut self, input: Sample) -> Sample;

    /// Process a block of samples
    fn process_block(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

/// Processor configuration for sample rate changes
pub trait ProcessorConfig {
    fn set_sample_rate(&mut self, sample_rate: f64);
}
