//! Structured errors that travel as values
//!
//! Function calls never panic on bad input. They return an `ImperialError`
//! inside a `Value`, carrying a machine-readable code and a hint.

use crate::InputError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const NOT_FINITE: &str = "NOT_FINITE";
    pub const NOT_POSITIVE: &str = "NOT_POSITIVE";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_LOCALE: &str = "UNKNOWN_LOCALE";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Structured error returned from function calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImperialError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ImperialError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Enter a plain decimal number such as 12 or 3.5")
    }

    pub fn not_finite(details: impl Into<String>) -> Self {
        Self::new(codes::NOT_FINITE, format!("Not a finite number: {}", details.into()))
    }

    pub fn not_positive(value: f64) -> Self {
        Self::new(codes::NOT_POSITIVE, format!("Value must be greater than zero, got {}", value))
            .with_suggestion("Enter a length larger than 0")
    }

    pub fn unknown_unit(name: &str, similar: &[&str]) -> Self {
        let err = Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", name));
        if similar.is_empty() {
            err.with_suggestion("Use list_units() to see supported units")
        } else {
            err.with_suggestion(format!("Did you mean: {}?", similar.join(", ")))
        }
    }

    pub fn unknown_locale(tag: &str) -> Self {
        Self::new(codes::UNKNOWN_LOCALE, format!("Unknown locale: {}", tag))
            .with_suggestion("Use a tag such as en-US, de-DE or fr_FR.UTF-8")
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
    }

    pub fn not_found(name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No function named '{}'", name))
    }
}

impl std::fmt::Display for ImperialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ImperialError {}

impl From<InputError> for ImperialError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Empty => Self::parse_error("empty input"),
            InputError::Invalid(s) => Self::parse_error(format!("'{}' is not a number", s)),
            InputError::NotFinite(s) => Self::not_finite(s),
            InputError::NotPositive(v) => Self::not_positive(v),
        }
    }
}
