//! Scream filter: saturating feedback filter network
//!
//! Per sample, each channel runs
//!
//! ```text
//!  x ──(+)── tanh ── lowpass ──┬──────────────────────────▶ y
//!       ▲                      │
//!       │                      ▼
//!  [feedback state] ◀── tanh(· × gain) ◀── highpass
//! ```
//!
//! The output is tapped after the lowpass. The highpass/feedback branch only
//! shapes what gets added to the *next* input sample. Both saturation points
//! are `tanh`, so the feedback register stays inside (-1, 1) for any gain.

use sf_core::{ProcessSpec, Sample};

use crate::biquad::{BiquadTDF2, BUTTERWORTH_Q};
use crate::saturation::soft_clip;
use crate::{MonoProcessor, Processor};

/// Lowpass cutoff used until parameters arrive (fully open)
pub const DEFAULT_LOWPASS_HZ: f32 = 20000.0;
/// Highpass cutoff used until parameters arrive
pub const DEFAULT_HIGHPASS_HZ: f32 = 20.0;
/// Linear feedback gain restored by `prepare`
pub const DEFAULT_FEEDBACK_GAIN: Sample = 1.0;

// ═══════════════════════════════════════════════════════════════════════════════
// SINGLE CHANNEL
// ═══════════════════════════════════════════════════════════════════════════════

/// One channel of the scream filter
///
/// Holds a lowpass and a highpass biquad, the feedback gain, and the one-sample
/// feedback register carried from sample `n - 1` into sample `n`.
#[derive(Debug, Clone)]
pub struct SingleChannelScreamFilter {
    lowpass: BiquadTDF2,
    highpass: BiquadTDF2,
    lowpass_freq: f32,
    highpass_freq: f32,
    sample_rate: f64,
    feedback_state: Sample,
    feedback_gain: Sample,
}

impl SingleChannelScreamFilter {
    pub fn new() -> Self {
        Self::with_cutoffs(DEFAULT_LOWPASS_HZ, DEFAULT_HIGHPASS_HZ)
    }

    /// Unprepared unit that will compute its coefficients from these cutoffs
    /// on the first `prepare`
    pub fn with_cutoffs(lowpass_freq: f32, highpass_freq: f32) -> Self {
        Self {
            lowpass: BiquadTDF2::new(0.0),
            highpass: BiquadTDF2::new(0.0),
            lowpass_freq,
            highpass_freq,
            sample_rate: 0.0,
            feedback_state: 0.0,
            feedback_gain: DEFAULT_FEEDBACK_GAIN,
        }
    }

    /// Start a new session at `spec.sample_rate`.
    ///
    /// Clears both filters and the feedback register, restores unity feedback
    /// gain, and recomputes coefficients for the new rate from the last
    /// cutoffs. The channel count in `spec` is ignored here.
    ///
    /// # Panics
    /// If `spec.sample_rate` is not a positive number. A zero or negative
    /// rate is a host misconfiguration with no safe way to continue.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        assert!(
            spec.sample_rate > 0.0,
            "scream filter prepared with invalid sample rate {}",
            spec.sample_rate
        );

        self.lowpass.prepare(spec.sample_rate);
        self.highpass.prepare(spec.sample_rate);

        self.sample_rate = spec.sample_rate;
        self.feedback_state = 0.0;
        self.feedback_gain = DEFAULT_FEEDBACK_GAIN;
        self.update_coefficients();
    }

    /// Recompute both coefficient sets and store the feedback gain.
    ///
    /// The feedback register is not touched, so automation does not restart
    /// the feedback history. Cutoffs outside `(0, sample_rate / 2)` are clamped.
    pub fn set_parameters(&mut self, lowpass_freq: f32, highpass_freq: f32, feedback_gain: f32) {
        debug_assert!(self.is_prepared(), "set_parameters called before prepare");

        self.lowpass_freq = lowpass_freq;
        self.highpass_freq = highpass_freq;
        self.feedback_gain = feedback_gain;
        self.update_coefficients();
    }

    fn update_coefficients(&mut self) {
        self.lowpass.set_lowpass(f64::from(self.lowpass_freq), BUTTERWORTH_Q);
        self.highpass.set_highpass(f64::from(self.highpass_freq), BUTTERWORTH_Q);
    }

    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.sample_rate > 0.0
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    #[inline]
    pub fn feedback_state(&self) -> Sample {
        self.feedback_state
    }

    #[inline]
    pub fn feedback_gain(&self) -> Sample {
        self.feedback_gain
    }

    #[inline]
    pub fn cutoffs(&self) -> (f32, f32) {
        (self.lowpass_freq, self.highpass_freq)
    }

    pub fn lowpass(&self) -> &BiquadTDF2 {
        &self.lowpass
    }

    pub fn highpass(&self) -> &BiquadTDF2 {
        &self.highpass
    }
}

impl Default for SingleChannelScreamFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for SingleChannelScreamFilter {
    fn reset(&mut self) {
        self.lowpass.reset();
        self.highpass.reset();
        self.feedback_state = 0.0;
    }
}

impl MonoProcessor for SingleChannelScreamFilter {
    #[inline]
    fn process_sample(&mut self, input: Sample) -> Sample {
        // Feedforward
        let saturated = soft_clip(input + self.feedback_state);
        let output = self.lowpass.process_sample(saturated);

        // Feedback
        let fed_back = self.highpass.process_sample(output);
        self.feedback_state = soft_clip(fed_back * self.feedback_gain);

        output
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MULTICHANNEL BANK
// ═══════════════════════════════════════════════════════════════════════════════

/// One [`SingleChannelScreamFilter`] per audio channel
///
/// Channels share no state. `prepare` is the only call that allocates.
#[derive(Debug, Clone)]
pub struct ScreamFilter {
    processors: Vec<SingleChannelScreamFilter>,
    lowpass_freq: f32,
    highpass_freq: f32,
}

impl ScreamFilter {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            lowpass_freq: DEFAULT_LOWPASS_HZ,
            highpass_freq: DEFAULT_HIGHPASS_HZ,
        }
    }

    /// Rebuild the bank with `spec.num_channels` fresh units and prepare each.
    ///
    /// Previous units are dropped even when the channel count is unchanged.
    /// New units start from the last broadcast cutoffs so their coefficients
    /// match the new sample rate before the next `set_parameters`.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        let (lowpass_freq, highpass_freq) = (self.lowpass_freq, self.highpass_freq);

        self.processors.clear();
        self.processors.resize_with(spec.channels(), || {
            SingleChannelScreamFilter::with_cutoffs(lowpass_freq, highpass_freq)
        });
        for processor in &mut self.processors {
            processor.prepare(spec);
        }

        log::debug!(
            "ScreamFilter prepared: sample_rate={}, max_block_size={}, channels={}",
            spec.sample_rate,
            spec.maximum_block_size,
            spec.num_channels
        );
    }

    /// Process `num_samples` of each channel in place.
    ///
    /// Channels past the prepared count are a caller bug and panic. Units
    /// without a matching channel keep their state.
    pub fn process<C: AsMut<[Sample]>>(&mut self, channels: &mut [C], num_samples: usize) {
        self.assert_channel_count(channels.len());

        for (channel, processor) in channels.iter_mut().zip(self.processors.iter_mut()) {
            processor.process_block(&mut channel.as_mut()[..num_samples]);
        }
    }

    /// Process `input` into separate `output` storage
    pub fn process_replacing<I, O>(&mut self, input: &[I], output: &mut [O], num_samples: usize)
    where
        I: AsRef<[Sample]>,
        O: AsMut<[Sample]>,
    {
        self.assert_channel_count(input.len());
        assert!(
            output.len() >= input.len(),
            "output has {} channels, input has {}",
            output.len(),
            input.len()
        );

        for ((src, dst), processor) in input
            .iter()
            .zip(output.iter_mut())
            .zip(self.processors.iter_mut())
        {
            let src = &src.as_ref()[..num_samples];
            let dst = &mut dst.as_mut()[..num_samples];
            for (out, &sample) in dst.iter_mut().zip(src) {
                *out = processor.process_sample(sample);
            }
        }
    }

    #[inline]
    fn assert_channel_count(&self, channels: usize) {
        assert!(
            channels <= self.processors.len(),
            "block has {} channels but the scream filter was prepared for {}",
            channels,
            self.processors.len()
        );
    }

    /// Send the same parameters to every channel
    pub fn set_parameters(&mut self, lowpass_freq: f32, highpass_freq: f32, feedback_gain: f32) {
        self.lowpass_freq = lowpass_freq;
        self.highpass_freq = highpass_freq;
        for processor in &mut self.processors {
            processor.set_parameters(lowpass_freq, highpass_freq, feedback_gain);
        }
    }

    /// Parameters for a single channel.
    ///
    /// Not remembered across `prepare`; a rebuilt bank starts from the last
    /// broadcast cutoffs.
    pub fn set_channel_parameters(
        &mut self,
        channel: usize,
        lowpass_freq: f32,
        highpass_freq: f32,
        feedback_gain: f32,
    ) {
        self.processors[channel].set_parameters(lowpass_freq, highpass_freq, feedback_gain);
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.processors.len()
    }

    pub fn processor(&self, channel: usize) -> Option<&SingleChannelScreamFilter> {
        self.processors.get(channel)
    }

    pub fn processors(&self) -> &[SingleChannelScreamFilter] {
        &self.processors
    }
}

impl Default for ScreamFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for ScreamFilter {
    fn reset(&mut self) {
        for processor in &mut self.processors {
            processor.reset();
        }
    }
}
