//! Imperial Units - Historical and imperial length conversion
//!
//! Twenty-one length units, each defined by how many meters it spans.
//! Every conversion routes through meters, so the table in `units` is the
//! single source of truth.
//!
//! Units, smallest to largest:
//! - Typographic (twip, point, line, pica)
//! - Body and grain measures (barleycorn, inch, nail, finger, palm,
//!   shaftment, hand, span, foot)
//! - Land and sea (yard, fathom, rod, chain, furlong, mile, nautical mile,
//!   league)
//!
//! ```
//! use imperial_units::{convert, format_result};
//!
//! let inches = convert(1.0, "foot", "inch");
//! assert!((inches - 12.0).abs() < 1e-9);
//! assert_eq!(format_result(4050.2, "foot"), "4,050.20 foot");
//! ```

mod convert;
mod format;
mod functions;
mod guide;
mod unit;
mod units;

pub use convert::{convert, list_units, to_meters, try_convert, Converter};
pub use format::{format_number, format_result, format_result_in, NumberLocale};
pub use guide::{guide_lines, guide_markdown};
pub use unit::{LengthUnit, UnitError};
pub use units::{UnitTable, LENGTH_UNITS, PIVOT, UNITS};

use imperial_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (3 functions)
        .with_function(functions::Convert)
        .with_function(functions::ToMeters)
        .with_function(functions::ConvertInput)

        // Presentation (1 function)
        .with_function(functions::FormatResult)

        // Inspection (2 functions)
        .with_function(functions::ListUnits)
        .with_function(functions::ConversionGuide)
}
