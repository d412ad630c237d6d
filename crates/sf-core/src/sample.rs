//! Sample types and audio buffer definitions

/// Type alias for audio samples (32-bit float, as delivered by the host)
pub type Sample = f32;

/// Non-interleaved multichannel audio buffer
///
/// Every channel holds the same number of samples. Allocation only happens
/// in the constructors; the accessors used per block never reallocate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<Sample>>,
    num_samples: usize,
}

impl AudioBuffer {
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_samples]; num_channels],
            num_samples,
        }
    }

    /// Build a buffer from per-channel vectors.
    ///
    /// Returns `None` when the channels differ in length.
    pub fn from_channels(channels: Vec<Vec<Sample>>) -> Option<Self> {
        let num_samples = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != num_samples) {
            return None;
        }
        Some(Self {
            channels,
            num_samples,
        })
    }

    /// Deinterleave frames of `num_channels` samples.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(data: &[Sample], num_channels: usize) -> Self {
        if num_channels == 0 {
            return Self::default();
        }
        let num_frames = data.len() / num_channels;
        let mut buffer = Self::new(num_channels, num_frames);
        for (i, frame) in data.chunks_exact(num_channels).enumerate() {
            for (ch, &sample) in frame.iter().enumerate() {
                buffer.channels[ch][i] = sample;
            }
        }
        buffer
    }

    pub fn to_interleaved(&self) -> Vec<Sample> {
        let mut out = Vec::with_capacity(self.num_samples * self.channels.len());
        for i in 0..self.num_samples {
            for channel in &self.channels {
                out.push(channel[i]);
            }
        }
        out
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples == 0 || self.channels.is_empty()
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[Sample] {
        &self.channels[index]
    }

    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [Sample] {
        &mut self.channels[index]
    }

    #[inline]
    pub fn channels(&self) -> &[Vec<Sample>] {
        &self.channels
    }

    #[inline]
    pub fn channels_mut(&mut self) -> &mut [Vec<Sample>] {
        &mut self.channels
    }

    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    pub fn clear_channel(&mut self, index: usize) {
        self.channels[index].fill(0.0);
    }
}
