//! Conversion guide - every unit with its meter equivalent

use crate::units::UNITS;

/// One line per unit, in display order: `"<unit> = <factor> meters"`.
pub fn guide_lines() -> Vec<String> {
    UNITS
        .iter()
        .map(|unit| format!("{} = {} meters", unit.name, plain_decimal(unit.meters)))
        .collect()
}

/// The guide as a markdown bullet list under a heading
pub fn guide_markdown() -> String {
    let mut out = String::from("# Conversion Guide\n\n");
    for line in guide_lines() {
        out.push_str("- ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Shortest round-tripping decimal, never in exponent form, always with a
/// fraction part (1852 prints as "1852.0").
fn plain_decimal(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}
