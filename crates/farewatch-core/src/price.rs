use crate::error::PriceError;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
}

/// One observed price, produced once per fetch and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceReading {
    pub value: f64,
    pub at: DateTime<Utc>,
}

impl PriceReading {
    /// Stamp a freshly extracted price with the current time.
    pub fn now(value: f64) -> Self {
        Self {
            value,
            at: Utc::now(),
        }
    }
}

/// Convert the site's price label into a number.
///
/// The observed format is a whole-number amount wrapped in currency symbols
/// and regular or non-breaking spaces as thousands separators ("25 901 ₽").
/// Stripping every non-digit character normalizes all of those at once; the
/// format carries no decimal point, so the result is always a whole number.
pub fn parse_price(text: &str) -> std::result::Result<f64, PriceError> {
    let digits = NON_DIGIT.replace_all(text, "");
    if digits.is_empty() {
        return Err(PriceError::NoDigits(text.to_string()));
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| PriceError::OutOfRange(text.to_string()))?;

    Ok(value as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_price("25901").unwrap(), 25901.0);
    }

    #[test]
    fn test_parse_ruble_label_with_spaces() {
        assert_eq!(parse_price("25 901 ₽").unwrap(), 25901.0);
    }

    #[test]
    fn test_parse_non_breaking_space_and_ascii_currency() {
        assert_eq!(parse_price("25\u{00A0}901 p").unwrap(), 25901.0);
    }

    #[test]
    fn test_parse_rejects_text_without_digits() {
        let err = parse_price("—").unwrap_err();
        assert!(matches!(err, PriceError::NoDigits(_)));
    }

    #[test]
    fn test_parse_rejects_absurdly_long_digit_runs() {
        let err = parse_price("99999999999999999999999999").unwrap_err();
        assert!(matches!(err, PriceError::OutOfRange(_)));
    }

    #[test]
    fn test_reading_is_timestamped() {
        let reading = PriceReading::now(100.0);
        assert_eq!(reading.value, 100.0);
        assert!(reading.at <= Utc::now());
    }
}
