//! Length unit representation

use std::fmt;
use serde::Serialize;
use thiserror::Error;

/// A named length unit and how many meters one of it spans
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthUnit {
    /// Canonical lowercase name (e.g. "foot", "nautical mile")
    pub name: &'static str,
    /// Meters in one unit
    pub meters: f64,
}

impl LengthUnit {
    pub const fn new(name: &'static str, meters: f64) -> Self {
        LengthUnit { name, meters }
    }

    /// Convert a value in this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters
    }

    /// Convert a value in meters to this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.meters
    }

    /// Convert a value from this unit to another, routed through meters
    pub fn convert_to(&self, value: f64, target: &LengthUnit) -> f64 {
        target.from_meters(self.to_meters(value))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("unknown unit: {name}")]
    UnknownUnit {
        name: String,
        /// Supported names resembling the one given
        suggestions: Vec<&'static str>,
    },
}
