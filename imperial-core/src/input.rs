//! Caller-side validation of entered magnitudes
//!
//! The conversion engine computes whatever it is given. Screening user text
//! happens here, before a conversion is attempted.

use thiserror::Error;

/// Why entered text cannot be used as a magnitude
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("No value entered")]
    Empty,

    #[error("Invalid number format: {0}")]
    Invalid(String),

    #[error("Not a finite number: {0}")]
    NotFinite(String),

    #[error("Value must be greater than zero, got {0}")]
    NotPositive(f64),
}

/// Parse entered text as a finite number.
///
/// Surrounding whitespace is ignored. `inf` and `NaN` parse as floats but
/// are rejected.
pub fn parse_magnitude(text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    let value: f64 = text
        .parse()
        .map_err(|_| InputError::Invalid(text.to_string()))?;

    if !value.is_finite() {
        return Err(InputError::NotFinite(text.to_string()));
    }
    Ok(value)
}

/// Parse entered text as a finite number strictly greater than zero.
pub fn parse_positive_magnitude(text: &str) -> Result<f64, InputError> {
    let value = parse_magnitude(text)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NotPositive(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_magnitude("12"), Ok(12.0));
        assert_eq!(parse_magnitude("  3.5 "), Ok(3.5));
        assert_eq!(parse_magnitude("-4"), Ok(-4.0));
        assert_eq!(parse_magnitude("1e3"), Ok(1000.0));
        assert_eq!(parse_magnitude(".25"), Ok(0.25));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_magnitude(""), Err(InputError::Empty));
        assert_eq!(parse_magnitude("   "), Err(InputError::Empty));
        assert_eq!(parse_magnitude("abc"), Err(InputError::Invalid("abc".to_string())));
        assert_eq!(parse_magnitude("1,5"), Err(InputError::Invalid("1,5".to_string())));
        assert_eq!(parse_magnitude("12 ft"), Err(InputError::Invalid("12 ft".to_string())));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(parse_magnitude("inf"), Err(InputError::NotFinite("inf".to_string())));
        assert_eq!(parse_magnitude("NaN"), Err(InputError::NotFinite("NaN".to_string())));
    }

    #[test]
    fn test_positive_only() {
        assert_eq!(parse_positive_magnitude("0.01"), Ok(0.01));
        assert_eq!(parse_positive_magnitude("0"), Err(InputError::NotPositive(0.0)));
        assert_eq!(parse_positive_magnitude("-3"), Err(InputError::NotPositive(-3.0)));
        assert_eq!(parse_positive_magnitude("x"), Err(InputError::Invalid("x".to_string())));
    }
}
