//! The conversion engine
//!
//! Every conversion goes value → meters → target, so the unit table is the
//! only source of factors and no pairwise table exists.

use imperial_core::UnknownUnitPolicy;
use crate::units::{PIVOT, UNITS};
use crate::{LengthUnit, UnitError};

/// Supported unit names in display order
pub fn list_units() -> Vec<&'static str> {
    UNITS.names()
}

/// Convert `value` from one unit to another.
///
/// Unknown names count as meters (factor 1.0). `value` is not checked:
/// zero, negative and non-finite inputs are computed as given.
pub fn convert(value: f64, from: &str, to: &str) -> f64 {
    unit_or_pivot(from).convert_to(value, unit_or_pivot(to))
}

/// Convert `value` in `unit` to meters. Unknown names count as meters.
pub fn to_meters(value: f64, unit: &str) -> f64 {
    unit_or_pivot(unit).to_meters(value)
}

/// Convert, failing on any name missing from the table
pub fn try_convert(value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
    Converter::strict().convert(value, from, to)
}

fn unit_or_pivot(name: &str) -> &'static LengthUnit {
    UNITS.get(name).unwrap_or(&PIVOT)
}

/// Conversion under an explicit unknown-unit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Converter {
    policy: UnknownUnitPolicy,
}

impl Converter {
    pub fn new(policy: UnknownUnitPolicy) -> Self {
        Converter { policy }
    }

    /// Unknown names count as meters
    pub fn fallback() -> Self {
        Self::new(UnknownUnitPolicy::FallbackToMeters)
    }

    /// Unknown names are an error
    pub fn strict() -> Self {
        Self::new(UnknownUnitPolicy::Reject)
    }

    pub fn policy(&self) -> UnknownUnitPolicy {
        self.policy
    }

    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        let from = UNITS.resolve(from, self.policy)?;
        let to = UNITS.resolve(to, self.policy)?;
        Ok(from.convert_to(value, to))
    }

    pub fn to_meters(&self, value: f64, unit: &str) -> Result<f64, UnitError> {
        Ok(UNITS.resolve(unit, self.policy)?.to_meters(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_list_units() {
        let units = list_units();
        assert_eq!(units.len(), 21);
        for name in &units {
            assert!(UNITS.get(name).is_some(), "{} missing from table", name);
        }
    }

    #[test]
    fn test_known_conversions() {
        assert!(approx_eq(convert(1.0, "foot", "inch"), 12.0));
        assert!(approx_eq(convert(1.0, "mile", "furlong"), 8.0));
        assert!(approx_eq(convert(1.0, "yard", "foot"), 3.0));
        assert!(approx_eq(convert(1.0, "chain", "rod"), 4.0));
        assert!(approx_eq(convert(1.0, "league", "mile"), 3.0));
        assert!(approx_eq(convert(1.0, "fathom", "yard"), 2.0));
        assert!(approx_eq(convert(1.0, "palm", "span"), 1.0));
    }

    #[test]
    fn test_identity() {
        for unit in list_units() {
            for x in [0.0, 1.0, 3.75, 1234.5, -42.0, 1e-6, 1e9] {
                assert!(approx_eq(convert(x, unit, unit), x), "{} {}", unit, x);
            }
        }
    }

    #[test]
    fn test_round_trip_every_pair() {
        let units = list_units();
        for a in &units {
            for b in &units {
                for x in [1.0, 1234.5, 0.003] {
                    let there = convert(x, a, b);
                    let back = convert(there, b, a);
                    assert!(approx_eq(back, x), "{} -> {} -> {}: {} != {}", a, b, a, back, x);
                }
            }
        }
    }

    #[test]
    fn test_unknown_unit_falls_back_to_meters() {
        assert_eq!(convert(5.0, "parsec", "meter"), 5.0);
        assert_eq!(convert(5.0, "meter", "parsec"), 5.0);
        assert!(approx_eq(convert(1.0, "feet", "foot"), 1.0 / 0.3048));
    }

    #[test]
    fn test_no_input_validation() {
        assert_eq!(convert(0.0, "foot", "inch"), 0.0);
        assert!(approx_eq(convert(-2.0, "yard", "foot"), -6.0));
        assert!(convert(f64::NAN, "foot", "inch").is_nan());
        assert_eq!(convert(f64::INFINITY, "foot", "inch"), f64::INFINITY);
    }

    #[test]
    fn test_engine_routes_through_unit_values() {
        for a in UNITS.iter() {
            for b in UNITS.iter() {
                assert_eq!(convert(7.5, a.name, b.name), a.convert_to(7.5, b));
            }
            assert_eq!(to_meters(7.5, a.name), a.to_meters(7.5));
            assert_eq!(convert(7.5, a.name, "parsec"), a.convert_to(7.5, &PIVOT));
        }
    }

    #[test]
    fn test_to_meters() {
        assert!(approx_eq(to_meters(2.0, "mile"), 3218.688));
        assert_eq!(to_meters(7.0, "unknown"), 7.0);
    }

    #[test]
    fn test_strict_rejects_unknown() {
        match try_convert(5.0, "parsec", "meter") {
            Err(UnitError::UnknownUnit { name, .. }) => assert_eq!(name, "parsec"),
            other => panic!("expected unknown unit, got {:?}", other),
        }
        assert!(try_convert(5.0, "foot", "furlongs").is_err());
    }

    #[test]
    fn test_strict_accepts_known_and_pivot() {
        let result = try_convert(1.0, "foot", "inch").unwrap();
        assert!(approx_eq(result, 12.0));
        assert!(approx_eq(try_convert(1.0, "meter", "foot").unwrap(), 1.0 / 0.3048));
        assert!(approx_eq(Converter::strict().to_meters(1.0, "rod").unwrap(), 5.0292));
    }

    #[test]
    fn test_converter_policies_agree_on_known_units() {
        let loose = Converter::fallback();
        let strict = Converter::strict();
        assert_eq!(Converter::default().policy(), UnknownUnitPolicy::FallbackToMeters);
        for a in list_units() {
            let expected = convert(10.0, a, "league");
            assert_eq!(loose.convert(10.0, a, "league"), Ok(expected));
            assert_eq!(strict.convert(10.0, a, "league"), Ok(expected));
        }
        assert_eq!(loose.convert(5.0, "parsec", "meter"), Ok(5.0));
    }
}
