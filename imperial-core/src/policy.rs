//! Policy for unit names missing from the conversion table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a conversion does when handed a unit name it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownUnitPolicy {
    /// Treat the name as meters (factor 1.0). A typo silently becomes a
    /// meter-denominated conversion.
    #[default]
    FallbackToMeters,
    /// Fail with an unknown-unit error.
    Reject,
}

impl UnknownUnitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownUnitPolicy::FallbackToMeters => "fallback",
            UnknownUnitPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for UnknownUnitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownUnitPolicy {
    type Err = String;

    /// Accepts `fallback`/`meters` and `reject`/`strict`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" | "meters" | "fallback_to_meters" => Ok(UnknownUnitPolicy::FallbackToMeters),
            "reject" | "strict" => Ok(UnknownUnitPolicy::Reject),
            other => Err(format!("unknown policy '{}', expected 'fallback' or 'reject'", other)),
        }
    }
}
