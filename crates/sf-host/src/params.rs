//! Parameter layout: lowpass, highpass and feedback gain

use std::fmt;
use std::str::FromStr;

use sf_core::{
    AtomicParam, NormalizedValue, ParamRange, SfError, frequency_as_text, gain_as_text,
    text_to_value,
};

pub const MIN_FREQUENCY_HZ: f64 = 20.0;
pub const MAX_FREQUENCY_HZ: f64 = 20000.0;

pub const MIN_FEEDBACK_DB: f64 = -18.0;
pub const MAX_FEEDBACK_DB: f64 = 6.0;
pub const CENTRE_FEEDBACK_DB: f64 = -2.0;

/// Stable parameter identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterId {
    Lowpass,
    Highpass,
    FeedbackGain,
}

impl ParameterId {
    pub const ALL: [Self; 3] = [Self::Lowpass, Self::Highpass, Self::FeedbackGain];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lowpass => "lowpass",
            Self::Highpass => "highpass",
            Self::FeedbackGain => "feedbackGain",
        }
    }

    pub fn info(self) -> ParameterInfo {
        match self {
            Self::Lowpass => ParameterInfo {
                id: self,
                name: "Lowpass",
                range: frequency_range(),
                unit: ParameterUnit::Hertz,
            },
            Self::Highpass => ParameterInfo {
                id: self,
                name: "Highpass",
                range: frequency_range(),
                unit: ParameterUnit::Hertz,
            },
            Self::FeedbackGain => ParameterInfo {
                id: self,
                name: "Feedback Gain",
                range: ParamRange::with_centre(
                    MIN_FEEDBACK_DB,
                    MAX_FEEDBACK_DB,
                    CENTRE_FEEDBACK_DB,
                    0.0,
                ),
                unit: ParameterUnit::Decibels,
            },
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterId {
    type Err = SfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SfError::InvalidParam(format!("unknown parameter id '{s}'")))
    }
}

fn frequency_range() -> ParamRange {
    ParamRange::logarithmic(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterUnit {
    Hertz,
    Decibels,
}

/// Static description of one control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterInfo {
    pub id: ParameterId,
    pub name: &'static str,
    pub range: ParamRange,
    pub unit: ParameterUnit,
}

impl ParameterInfo {
    pub fn default_value(&self) -> f32 {
        self.range.default as f32
    }

    pub fn value_to_text(&self, value: f32) -> String {
        match self.unit {
            ParameterUnit::Hertz => frequency_as_text(value, 2),
            ParameterUnit::Decibels => gain_as_text(value, 2),
        }
    }

    /// Parse typed text, clamped into range
    pub fn text_to_value(&self, text: &str) -> f32 {
        self.range.clamp(f64::from(text_to_value(text))) as f32
    }
}

/// Plain copy of the control values read for one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterValues {
    pub lowpass_hz: f32,
    pub highpass_hz: f32,
    pub feedback_db: f32,
}

/// Live control values shared between the control side and the audio callback
#[derive(Debug)]
pub struct ScreamParameters {
    lowpass: AtomicParam,
    highpass: AtomicParam,
    feedback_gain: AtomicParam,
}

impl ScreamParameters {
    pub fn new() -> Self {
        Self {
            lowpass: AtomicParam::new(ParameterId::Lowpass.info().default_value()),
            highpass: AtomicParam::new(ParameterId::Highpass.info().default_value()),
            feedback_gain: AtomicParam::new(ParameterId::FeedbackGain.info().default_value()),
        }
    }

    fn cell(&self, id: ParameterId) -> &AtomicParam {
        match id {
            ParameterId::Lowpass => &self.lowpass,
            ParameterId::Highpass => &self.highpass,
            ParameterId::FeedbackGain => &self.feedback_gain,
        }
    }

    #[inline]
    pub fn get(&self, id: ParameterId) -> f32 {
        self.cell(id).get()
    }

    /// Store a plain value, clamped to the parameter's range
    pub fn set(&self, id: ParameterId, value: f32) {
        let range = id.info().range;
        self.cell(id).set(range.clamp(f64::from(value)) as f32);
    }

    pub fn set_normalized(&self, id: ParameterId, value: NormalizedValue) {
        let range = id.info().range;
        self.cell(id).set(range.denormalize(value.get()) as f32);
    }

    pub fn normalized(&self, id: ParameterId) -> NormalizedValue {
        NormalizedValue::new(id.info().range.normalize(f64::from(self.get(id))))
    }

    pub fn set_from_text(&self, id: ParameterId, text: &str) {
        self.cell(id).set(id.info().text_to_value(text));
    }

    pub fn text(&self, id: ParameterId) -> String {
        id.info().value_to_text(self.get(id))
    }

    /// Independent relaxed loads; values written concurrently may mix blocks
    #[inline]
    pub fn values(&self) -> ParameterValues {
        ParameterValues {
            lowpass_hz: self.lowpass.get(),
            highpass_hz: self.highpass.get(),
            feedback_db: self.feedback_gain.get(),
        }
    }
}

impl Default for ScreamParameters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let params = ScreamParameters::new();
        assert_eq!(
            params.values(),
            ParameterValues {
                lowpass_hz: 20.0,
                highpass_hz: 20.0,
                feedback_db: 0.0,
            }
        );
    }

    #[test]
    fn test_ids_roundtrip_through_strings() {
        for id in ParameterId::ALL {
            assert_eq!(id.as_str().parse::<ParameterId>().unwrap(), id);
        }
        assert!("drive".parse::<ParameterId>().is_err());
        assert_eq!(ParameterId::FeedbackGain.to_string(), "feedbackGain");
    }

    #[test]
    fn test_set_clamps_to_range() {
        let params = ScreamParameters::new();
        params.set(ParameterId::Lowpass, 50_000.0);
        params.set(ParameterId::Highpass, 1.0);
        params.set(ParameterId::FeedbackGain, -40.0);

        assert_eq!(params.get(ParameterId::Lowpass), 20000.0);
        assert_eq!(params.get(ParameterId::Highpass), 20.0);
        assert_eq!(params.get(ParameterId::FeedbackGain), -18.0);
    }

    #[test]
    fn test_normalized_access() {
        let params = ScreamParameters::new();
        params.set_normalized(ParameterId::FeedbackGain, NormalizedValue::HALF);
        assert_relative_eq!(params.get(ParameterId::FeedbackGain), -2.0, epsilon = 1e-5);

        params.set_normalized(ParameterId::Lowpass, NormalizedValue::ONE);
        assert_relative_eq!(params.get(ParameterId::Lowpass), 20000.0, epsilon = 1e-2);
        assert_relative_eq!(params.normalized(ParameterId::Lowpass).get(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_text_conversion() {
        let params = ScreamParameters::new();
        params.set_from_text(ParameterId::Lowpass, "2.5k");
        assert_eq!(params.get(ParameterId::Lowpass), 2500.0);
        assert_eq!(params.text(ParameterId::Lowpass), "2.50 kHz");

        params.set_from_text(ParameterId::Highpass, "150 Hz");
        assert_eq!(params.text(ParameterId::Highpass), "150.0 Hz");

        params.set_from_text(ParameterId::FeedbackGain, "-3 dB");
        assert_eq!(params.text(ParameterId::FeedbackGain), "-3.00 dB");

        // Out-of-range text lands on the range edge
        params.set_from_text(ParameterId::FeedbackGain, "100");
        assert_eq!(params.get(ParameterId::FeedbackGain), 6.0);
    }
}
