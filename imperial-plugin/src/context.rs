//! Evaluation Context

use imperial_core::UnknownUnitPolicy;

/// Settings every function call sees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Locale tag used when formatting numbers (e.g. "en-US", "de_DE.UTF-8")
    pub locale: String,
    pub unknown_units: UnknownUnitPolicy,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            locale: "en-US".to_string(),
            unknown_units: UnknownUnitPolicy::default(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_unknown_units(mut self, policy: UnknownUnitPolicy) -> Self {
        self.unknown_units = policy;
        self
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
