//! Block-level driver between the host callback and the scream filter

use std::sync::Arc;

use sf_core::{AudioBuffer, Decibels, ProcessSpec, SfError, SfResult};
use sf_dsp::ScreamFilter;

use crate::{PLUGIN_NAME, ScreamParameters};

/// Input/output channel configuration offered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    pub input_channels: u32,
    pub output_channels: u32,
}

impl BusLayout {
    pub const MONO: Self = Self::new(1, 1);
    pub const STEREO: Self = Self::new(2, 2);

    pub const fn new(input_channels: u32, output_channels: u32) -> Self {
        Self {
            input_channels,
            output_channels,
        }
    }

    /// Mono or stereo, with matching input and output
    pub fn is_supported(&self) -> bool {
        matches!(self.output_channels, 1 | 2) && self.input_channels == self.output_channels
    }
}

impl Default for BusLayout {
    fn default() -> Self {
        Self::STEREO
    }
}

/// Audio processor hosting one [`ScreamFilter`]
pub struct ScreamFilterProcessor {
    parameters: Arc<ScreamParameters>,
    scream_filter: ScreamFilter,
    layout: BusLayout,
    spec: Option<ProcessSpec>,
}

impl ScreamFilterProcessor {
    pub fn new() -> Self {
        Self::with_parameters(Arc::new(ScreamParameters::new()))
    }

    pub fn with_parameters(parameters: Arc<ScreamParameters>) -> Self {
        Self {
            parameters,
            scream_filter: ScreamFilter::new(),
            layout: BusLayout::default(),
            spec: None,
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }

    /// Handle for the control side to write parameter values
    pub fn parameters(&self) -> Arc<ScreamParameters> {
        Arc::clone(&self.parameters)
    }

    pub fn layout(&self) -> BusLayout {
        self.layout
    }

    pub fn is_layout_supported(layout: &BusLayout) -> bool {
        layout.is_supported()
    }

    /// Switch bus layout. Takes effect at the next `prepare_to_play`.
    pub fn set_layout(&mut self, layout: BusLayout) -> SfResult<()> {
        if !layout.is_supported() {
            return Err(SfError::ChannelMismatch {
                expected: layout.output_channels as usize,
                actual: layout.input_channels as usize,
            });
        }
        self.layout = layout;
        Ok(())
    }

    /// Spec from the last successful `prepare_to_play`
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.spec
    }

    pub fn prepare_to_play(&mut self, sample_rate: f64, samples_per_block: u32) -> SfResult<()> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(SfError::InvalidSampleRate(sample_rate));
        }

        let channels = self.layout.input_channels.max(self.layout.output_channels);
        let spec = ProcessSpec::new(sample_rate, samples_per_block, channels);
        log::debug!(
            "prepare_to_play() - sample_rate: {}, max_block_size: {}, num_channels: {}",
            spec.sample_rate,
            spec.maximum_block_size,
            spec.num_channels
        );

        self.scream_filter.prepare(&spec);
        self.spec = Some(spec);
        Ok(())
    }

    /// Run one host block in place.
    ///
    /// Output channels past the input count are silenced; then the controls
    /// are loaded once and applied before filtering. Until the first
    /// `prepare_to_play` the input channels pass through unfiltered.
    pub fn process_block(&mut self, buffer: &mut AudioBuffer) {
        let input_channels = self.layout.input_channels as usize;
        for channel in input_channels..buffer.num_channels() {
            buffer.clear_channel(channel);
        }

        let values = self.parameters.values();
        let feedback_gain = Decibels(f64::from(values.feedback_db)).to_gain() as f32;
        self.scream_filter
            .set_parameters(values.lowpass_hz, values.highpass_hz, feedback_gain);

        let num_samples = buffer.num_samples();
        let channels = buffer.num_channels().min(self.scream_filter.num_channels());
        self.scream_filter
            .process(&mut buffer.channels_mut()[..channels], num_samples);
    }

    pub fn scream_filter(&self) -> &ScreamFilter {
        &self.scream_filter
    }
}

impl Default for ScreamFilterProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterId;
    use approx::assert_relative_eq;
    use sf_dsp::{MonoProcessor, SingleChannelScreamFilter};

    fn noise(len: usize, seed: u32) -> Vec<f32> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn test_layouts() {
        assert!(BusLayout::MONO.is_supported());
        assert!(BusLayout::STEREO.is_supported());
        assert!(!BusLayout::new(1, 2).is_supported());
        assert!(!BusLayout::new(6, 6).is_supported());
        assert!(ScreamFilterProcessor::is_layout_supported(&BusLayout::MONO));

        let mut processor = ScreamFilterProcessor::new();
        assert!(processor.set_layout(BusLayout::new(2, 1)).is_err());
        assert_eq!(processor.layout(), BusLayout::STEREO);
    }

    #[test]
    fn test_prepare_rejects_bad_sample_rate() {
        let mut processor = ScreamFilterProcessor::new();
        for rate in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                processor.prepare_to_play(rate, 512),
                Err(SfError::InvalidSampleRate(_))
            ));
        }
        assert!(processor.spec().is_none());
    }

    #[test]
    fn test_prepare_uses_layout_channels() {
        let mut processor = ScreamFilterProcessor::new();
        processor.set_layout(BusLayout::MONO).unwrap();
        processor.prepare_to_play(44100.0, 128).unwrap();

        assert_eq!(processor.spec(), Some(ProcessSpec::new(44100.0, 128, 1)));
        assert_eq!(processor.scream_filter().num_channels(), 1);
        assert_eq!(processor.tail_length_seconds(), 0.0);
        assert_eq!(processor.name(), "ScreamFilter");
    }

    #[test]
    fn test_block_applies_decibel_feedback() {
        let mut processor = ScreamFilterProcessor::new();
        processor.prepare_to_play(48000.0, 64).unwrap();

        let params = processor.parameters();
        params.set(ParameterId::Lowpass, 3000.0);
        params.set(ParameterId::Highpass, 300.0);
        params.set(ParameterId::FeedbackGain, 6.0);

        let mut buffer = AudioBuffer::new(2, 64);
        processor.process_block(&mut buffer);

        for unit in processor.scream_filter().processors() {
            assert_eq!(unit.cutoffs(), (3000.0, 300.0));
            assert_relative_eq!(unit.feedback_gain(), 1.995_262_3, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_block_matches_direct_filtering() {
        let mut processor = ScreamFilterProcessor::new();
        processor.set_layout(BusLayout::MONO).unwrap();
        processor.prepare_to_play(48000.0, 256).unwrap();
        processor.parameters().set(ParameterId::Lowpass, 5000.0);
        processor.parameters().set(ParameterId::Highpass, 100.0);
        processor.parameters().set(ParameterId::FeedbackGain, 0.0);

        let input = noise(1024, 9);
        let mut expected_unit = SingleChannelScreamFilter::new();
        expected_unit.prepare(&ProcessSpec::new(48000.0, 256, 1));
        expected_unit.set_parameters(5000.0, 100.0, 1.0);
        let expected: Vec<f32> = input.iter().map(|&x| expected_unit.process_sample(x)).collect();

        let mut output = Vec::new();
        for block in input.chunks(256) {
            let mut buffer = AudioBuffer::from_channels(vec![block.to_vec()]).unwrap();
            processor.process_block(&mut buffer);
            output.extend_from_slice(buffer.channel(0));
        }
        assert_eq!(output, expected);
    }

    #[test]
    fn test_extra_output_channels_cleared() {
        let mut processor = ScreamFilterProcessor::new();
        processor.set_layout(BusLayout::MONO).unwrap();
        processor.prepare_to_play(48000.0, 32).unwrap();

        let mut buffer = AudioBuffer::from_channels(vec![vec![0.5; 32], vec![0.5; 32]]).unwrap();
        processor.process_block(&mut buffer);
        assert!(buffer.channel(1).iter().all(|&s| s == 0.0));
        assert!(buffer.channel(0).iter().any(|&s| s != 0.5));
    }

    #[test]
    fn test_unprepared_block_passes_through() {
        let mut processor = ScreamFilterProcessor::new();
        let mut buffer = AudioBuffer::from_channels(vec![vec![0.25; 8], vec![-0.25; 8]]).unwrap();
        processor.process_block(&mut buffer);
        assert_eq!(buffer.channel(0), &[0.25; 8]);
        assert_eq!(buffer.channel(1), &[-0.25; 8]);
    }

    #[test]
    fn test_parameters_written_from_another_thread() {
        let mut processor = ScreamFilterProcessor::new();
        processor.prepare_to_play(48000.0, 16).unwrap();

        let params = processor.parameters();
        std::thread::spawn(move || params.set(ParameterId::Lowpass, 1234.0))
            .join()
            .unwrap();

        processor.process_block(&mut AudioBuffer::new(2, 16));
        assert_eq!(processor.scream_filter().processors()[0].cutoffs().0, 1234.0);
    }
}
