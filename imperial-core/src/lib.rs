//! Imperial Core - Fundamental types
//!
//! This crate provides the core types shared by every Imperial crate:
//! - `Value`: Runtime values passed to and returned from functions
//! - `ImperialError`: Structured errors that travel as values
//! - `UnknownUnitPolicy`: What to do with a unit name missing from the table
//! - `parse_magnitude`: Caller-side validation of user-entered numbers
//! - `similar_names`: Suggestions for misspelled unit and function names

mod error;
mod input;
mod policy;
mod suggest;
mod value;

pub use error::{codes, ImperialError};
pub use input::{parse_magnitude, parse_positive_magnitude, InputError};
pub use policy::UnknownUnitPolicy;
pub use suggest::similar_names;
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ImperialError, UnknownUnitPolicy, Value};
}
