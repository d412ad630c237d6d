//! Biquad filter implementation using Transposed Direct Form II
//!
//! Coefficients are computed and state is accumulated in f64; samples enter
//! and leave as [`Sample`].

use sf_core::Sample;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::{MonoProcessor, Processor, ProcessorConfig};

/// Butterworth Q, the default for the scream filter stages
pub const BUTTERWORTH_Q: f64 = FRAC_1_SQRT_2;

/// Lowest cutoff accepted by [`clamp_cutoff`]
pub const MIN_CUTOFF_HZ: f64 = 1.0;

/// Highest cutoff as a fraction of the sample rate
pub const MAX_CUTOFF_RATIO: f64 = 0.499;

/// Clamp a cutoff into `[MIN_CUTOFF_HZ, sample_rate * MAX_CUTOFF_RATIO]`.
///
/// Cutoffs at or past Nyquist make `tan`/`sin` of the warped frequency
/// degenerate, so they are pulled just below it. The ceiling always wins
/// over the floor: at sample rates below ~2 Hz the whole range sits under
/// `MIN_CUTOFF_HZ`. NaN maps to the lowest allowed cutoff.
#[inline]
pub fn clamp_cutoff(freq: f64, sample_rate: f64) -> f64 {
    let max = sample_rate * MAX_CUTOFF_RATIO;
    let min = MIN_CUTOFF_HZ.min(max);
    if freq.is_nan() {
        min
    } else {
        freq.clamp(min, max)
    }
}

/// Biquad coefficients
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Calculate lowpass filter coefficients
    pub fn lowpass(freq: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Calculate highpass filter coefficients
    pub fn highpass(freq: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 + cos_omega) / 2.0;
        let b1 = -(1.0 + cos_omega);
        let b2 = (1.0 + cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Bypass (unity gain, no filtering)
    pub fn bypass() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    /// Poles strictly inside the unit circle
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

/// Transposed Direct Form II biquad filter
#[derive(Debug, Clone)]
pub struct BiquadTDF2 {
    coeffs: BiquadCoeffs,
    z1: f64,
    z2: f64,
    sample_rate: f64,
}

impl BiquadTDF2 {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            coeffs: BiquadCoeffs::bypass(),
            z1: 0.0,
            z2: 0.0,
            sample_rate,
        }
    }

    /// Clear the delay line and adopt a new sample rate.
    ///
    /// Coefficients are left alone; callers recompute them for the new rate.
    pub fn prepare(&mut self, sample_rate: f64) {
        self.set_sample_rate(sample_rate);
        self.reset();
    }

    #[inline]
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    #[inline]
    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Set as lowpass filter; the cutoff is clamped below Nyquist
    pub fn set_lowpass(&mut self, freq: f64, q: f64) {
        let freq = clamp_cutoff(freq, self.sample_rate);
        self.set_coeffs(BiquadCoeffs::lowpass(freq, q, self.sample_rate));
    }

    /// Set as highpass filter; the cutoff is clamped below Nyquist
    pub fn set_highpass(&mut self, freq: f64, q: f64) {
        let freq = clamp_cutoff(freq, self.sample_rate);
        self.set_coeffs(BiquadCoeffs::highpass(freq, q, self.sample_rate));
    }

    /// Set as bypass
    pub fn set_bypass(&mut self) {
        self.set_coeffs(BiquadCoeffs::bypass());
    }
}

impl Processor for BiquadTDF2 {
    fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

impl MonoProcessor for BiquadTDF2 {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        let input = f64::from(input);
        let output = self.coeffs.b0 * input + self.z1;
        self.z1 = self.coeffs.b1 * input - self.coeffs.a1 * output + self.z2;
        self.z2 = self.coeffs.b2 * input - self.coeffs.a2 * output;
        output as Sample
    }
}

impl ProcessorConfig for BiquadTDF2 {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }
}
