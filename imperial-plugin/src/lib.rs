//! Imperial Plugin System
//!
//! Functions are registered in a `PluginRegistry` and called with a slice
//! of `Value` arguments and an `EvalContext`.

mod context;
mod registry;
mod traits;

pub use context::EvalContext;
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use imperial_core::prelude::*;
}
