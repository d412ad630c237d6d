//! WAV reading and writing (hound)

use std::path::Path;

use sf_core::{AudioBuffer, Sample};

use crate::{RenderError, RenderResult};

/// Decoded WAV file
#[derive(Debug, Clone)]
pub struct WavAudio {
    pub buffer: AudioBuffer,
    pub sample_rate: u32,
}

/// Read a WAV file, normalizing integer formats to [-1, 1)
pub fn read_wav<P: AsRef<Path>>(path: P) -> RenderResult<WavAudio> {
    let reader = hound::WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let num_channels = spec.channels as usize;

    let samples: Vec<Sample> = match spec.sample_format {
        hound::SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(RenderError::UnsupportedFormat {
                    bits: spec.bits_per_sample,
                    format: "float",
                });
            }
            reader.into_samples::<f32>().collect::<Result<Vec<_>, hound::Error>>()?
        }
        hound::SampleFormat::Int => {
            if !(1..=32).contains(&spec.bits_per_sample) {
                return Err(RenderError::UnsupportedFormat {
                    bits: spec.bits_per_sample,
                    format: "int",
                });
            }
            let max_value = (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| (f64::from(v) / max_value) as Sample))
                .collect::<Result<Vec<_>, hound::Error>>()?
        }
    };

    Ok(WavAudio {
        buffer: AudioBuffer::from_interleaved(&samples, num_channels),
        sample_rate: spec.sample_rate,
    })
}

/// Write a 32-bit float WAV file
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    buffer: &AudioBuffer,
    sample_rate: u32,
) -> RenderResult<()> {
    let spec = hound::WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for sample in buffer.to_interleaved() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
