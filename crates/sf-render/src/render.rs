//! Block-by-block rendering through the host processor

use std::path::Path;

use sf_core::AudioBuffer;
use sf_host::{BusLayout, ParameterId, ScreamFilterProcessor};

use crate::{RenderConfig, RenderError, RenderResult, WavAudio, read_wav, write_wav};

/// Summary of a finished render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    pub num_channels: usize,
    pub num_samples: usize,
    pub sample_rate: u32,
    pub blocks: usize,
    pub peak: f32,
}

/// Filter `input` with the settings in `config`
pub fn render(
    input: &AudioBuffer,
    sample_rate: u32,
    config: &RenderConfig,
) -> RenderResult<(AudioBuffer, RenderReport)> {
    config.validate()?;

    let channels = input.num_channels();
    let layout = BusLayout::new(channels as u32, channels as u32);
    if !ScreamFilterProcessor::is_layout_supported(&layout) {
        return Err(RenderError::UnsupportedChannels(channels));
    }

    let mut processor = ScreamFilterProcessor::new();
    processor.set_layout(layout)?;
    processor.prepare_to_play(f64::from(sample_rate), config.block_size as u32)?;

    let params = processor.parameters();
    params.set(ParameterId::Lowpass, config.lowpass_hz);
    params.set(ParameterId::Highpass, config.highpass_hz);
    params.set(ParameterId::FeedbackGain, config.feedback_db);

    let num_samples = input.num_samples();
    let mut output = AudioBuffer::new(channels, num_samples);
    let mut block = AudioBuffer::new(channels, config.block_size);
    let mut blocks = 0;
    let mut start = 0;

    while start < num_samples {
        let len = config.block_size.min(num_samples - start);
        if len < block.num_samples() {
            block = AudioBuffer::new(channels, len);
        }

        for ch in 0..channels {
            block
                .channel_mut(ch)
                .copy_from_slice(&input.channel(ch)[start..start + len]);
        }
        processor.process_block(&mut block);
        for ch in 0..channels {
            output.channel_mut(ch)[start..start + len].copy_from_slice(block.channel(ch));
        }

        start += len;
        blocks += 1;
    }

    let peak = output
        .channels()
        .iter()
        .flatten()
        .fold(0.0_f32, |peak, &s| peak.max(s.abs()));

    let report = RenderReport {
        num_channels: channels,
        num_samples,
        sample_rate,
        blocks,
        peak,
    };
    Ok((output, report))
}

/// Read `input_path`, render, and write the result to `output_path`
pub fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    config: &RenderConfig,
) -> RenderResult<RenderReport> {
    let WavAudio {
        buffer,
        sample_rate,
    } = read_wav(input_path.as_ref())?;
    log::info!(
        "Rendering {} ({} ch, {} samples @ {} Hz)",
        input_path.as_ref().display(),
        buffer.num_channels(),
        buffer.num_samples(),
        sample_rate
    );

    let (output, report) = render(&buffer, sample_rate, config)?;
    if report.peak > 1.0 {
        log::warn!("Output peak {:.3} exceeds full scale", report.peak);
    }

    write_wav(output_path.as_ref(), &output, sample_rate)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, freq: f32, sample_rate: f32) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_render_counts_partial_blocks() {
        let input = AudioBuffer::from_channels(vec![sine(1000, 220.0, 48000.0)]).unwrap();
        let config = RenderConfig::default()
            .with_lowpass(5000.0)
            .with_block_size(256);

        let (output, report) = render(&input, 48000, &config).unwrap();
        assert_eq!(report.blocks, 4);
        assert_eq!(output.num_samples(), 1000);
        assert_eq!(report.num_channels, 1);
        assert!(report.peak > 0.0 && report.peak.is_finite());
    }

    #[test]
    fn test_render_independent_of_block_size() {
        let input = AudioBuffer::from_channels(vec![
            sine(2000, 110.0, 44100.0),
            sine(2000, 330.0, 44100.0),
        ])
        .unwrap();
        let config = RenderConfig::default()
            .with_lowpass(3000.0)
            .with_highpass(200.0)
            .with_feedback_db(3.0);

        let (a, _) = render(&input, 44100, &config.with_block_size(64)).unwrap();
        let (b, _) = render(&input, 44100, &config.with_block_size(1000)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_rejects_multichannel() {
        let input = AudioBuffer::new(3, 16);
        let result = render(&input, 48000, &RenderConfig::default());
        assert!(matches!(result, Err(RenderError::UnsupportedChannels(3))));
    }

    #[test]
    fn test_render_rejects_zero_sample_rate() {
        let input = AudioBuffer::new(1, 16);
        assert!(matches!(
            render(&input, 0, &RenderConfig::default()),
            Err(RenderError::Core(_))
        ));
    }
}
