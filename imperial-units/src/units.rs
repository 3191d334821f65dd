//! The unit table - 21 historical and imperial length units

use std::collections::HashMap;
use std::sync::LazyLock;
use imperial_core::{similar_names, UnknownUnitPolicy};
use crate::{LengthUnit, UnitError};

/// The implicit base unit every conversion routes through.
/// Resolvable by name, never listed.
pub const PIVOT: LengthUnit = LengthUnit::new("meter", 1.0);

/// Supported units in display order, smallest to largest with the
/// body-measure units grouped together.
pub const LENGTH_UNITS: [LengthUnit; 21] = [
    LengthUnit::new("twip", 0.000017639),
    LengthUnit::new("point", 0.000352778),
    LengthUnit::new("line", 0.00211667),
    LengthUnit::new("pica", 0.00423333),
    LengthUnit::new("barleycorn", 0.00847),
    LengthUnit::new("inch", 0.0254),
    LengthUnit::new("nail", 0.05715),
    LengthUnit::new("finger", 0.1143),
    LengthUnit::new("palm", 0.2286),
    LengthUnit::new("shaftment", 0.1524),
    LengthUnit::new("hand", 0.1016),
    LengthUnit::new("span", 0.2286),
    LengthUnit::new("foot", 0.3048),
    LengthUnit::new("yard", 0.9144),
    LengthUnit::new("fathom", 1.8288),
    LengthUnit::new("rod", 5.0292),
    LengthUnit::new("chain", 20.1168),
    LengthUnit::new("furlong", 201.168),
    LengthUnit::new("mile", 1609.344),
    LengthUnit::new("nautical mile", 1852.0),
    LengthUnit::new("league", 4828.032),
];

/// Global unit table
pub static UNITS: LazyLock<UnitTable> = LazyLock::new(UnitTable::new);

/// Read-only lookup over `LENGTH_UNITS`
pub struct UnitTable {
    units: &'static [LengthUnit],
    index: HashMap<&'static str, usize>,
}

impl UnitTable {
    fn new() -> Self {
        let index = LENGTH_UNITS
            .iter()
            .enumerate()
            .map(|(i, unit)| (unit.name, i))
            .collect();
        UnitTable { units: &LENGTH_UNITS, index }
    }

    /// Get a unit by its exact canonical name. "meter" resolves to the pivot.
    pub fn get(&self, name: &str) -> Option<&LengthUnit> {
        if name == PIVOT.name {
            return Some(&PIVOT);
        }
        self.index.get(name).map(|&i| &self.units[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Supported unit names in display order
    pub fn names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LengthUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Look up `name` under `policy`. A missing name is the pivot when
    /// falling back.
    pub fn resolve(
        &self,
        name: &str,
        policy: UnknownUnitPolicy,
    ) -> Result<&LengthUnit, UnitError> {
        match (self.get(name), policy) {
            (Some(unit), _) => Ok(unit),
            (None, UnknownUnitPolicy::FallbackToMeters) => Ok(&PIVOT),
            (None, UnknownUnitPolicy::Reject) => Err(UnitError::UnknownUnit {
                name: name.to_string(),
                suggestions: self.similar(name),
            }),
        }
    }

    /// Up to three supported names resembling `name`
    pub fn similar(&self, name: &str) -> Vec<&'static str> {
        let mut names = similar_names(name, self.units.iter().map(|u| u.name));
        names.truncate(3);
        names
    }
}
