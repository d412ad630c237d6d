//! Text conversion for parameter values shown to and typed by the user

/// Format a frequency, switching to kHz from 1000 Hz upwards
///
/// kHz values get `max_decimals` decimal places, Hz values one fewer.
pub fn frequency_as_text(value: f32, max_decimals: usize) -> String {
    if value >= 1000.0 {
        format!("{:.*} kHz", max_decimals, value / 1000.0)
    } else {
        format!("{:.*} Hz", max_decimals.saturating_sub(1), value)
    }
}

pub fn gain_as_text(value: f32, decimals: usize) -> String {
    format!("{:.*} dB", decimals, value)
}

/// Parse user-entered text such as `"2.5k"`, `"440 Hz"` or `"-3 dB"`
///
/// Only the leading number is read; text without one yields 0.0. A `k` or
/// `K` anywhere in the text scales the value by 1000.
pub fn text_to_value(text: &str) -> f32 {
    let mut value = leading_float(text);
    if text.contains(['k', 'K']) {
        value *= 1000.0;
    }
    value
}

fn leading_float(text: &str) -> f32 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || &trimmed[digits_start..end] == "." {
        return 0.0;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    trimmed[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_as_text() {
        assert_eq!(frequency_as_text(440.0, 2), "440.0 Hz");
        assert_eq!(frequency_as_text(20.0, 2), "20.0 Hz");
        assert_eq!(frequency_as_text(1500.0, 2), "1.50 kHz");
        assert_eq!(frequency_as_text(20000.0, 2), "20.00 kHz");
        assert_eq!(frequency_as_text(100.0, 0), "100 Hz");
    }

    #[test]
    fn test_gain_as_text() {
        assert_eq!(gain_as_text(-2.0, 2), "-2.00 dB");
        assert_eq!(gain_as_text(6.0, 1), "6.0 dB");
    }

    #[test]
    fn test_text_to_value() {
        assert_eq!(text_to_value("440"), 440.0);
        assert_eq!(text_to_value("  440 Hz"), 440.0);
        assert_eq!(text_to_value("2.5k"), 2500.0);
        assert_eq!(text_to_value("1.5 KHz"), 1500.0);
        assert_eq!(text_to_value("-3.5 dB"), -3.5);
        assert_eq!(text_to_value("1e3"), 1000.0);
        assert_eq!(text_to_value("2e"), 2.0);
        assert_eq!(text_to_value(".5"), 0.5);
    }

    #[test]
    fn test_text_without_number_is_zero() {
        assert_eq!(text_to_value(""), 0.0);
        assert_eq!(text_to_value("loud"), 0.0);
        assert_eq!(text_to_value("-"), 0.0);
        assert_eq!(text_to_value("."), 0.0);
    }
}
