//! Imperial - Length conversion between historical and imperial units
//!
//! `Imperial` bundles a function registry with the settings every call
//! sees: the locale used for formatting and the unknown-unit policy.

use imperial_plugin::EvalContext;
use std::sync::Arc;

pub use imperial_core::{ImperialError, UnknownUnitPolicy, Value};
pub use imperial_plugin::{FunctionMeta, PluginRegistry};
pub use imperial_units as units;

/// Registry with every built-in library loaded
pub fn standard_registry() -> PluginRegistry {
    imperial_units::load_units_library(PluginRegistry::new())
}

/// Main Imperial engine
pub struct Imperial {
    registry: Arc<PluginRegistry>,
    context: EvalContext,
}

impl Imperial {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            context: EvalContext::new(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.context = self.context.with_locale(locale);
        self
    }

    pub fn with_unknown_unit_policy(mut self, policy: UnknownUnitPolicy) -> Self {
        self.context = self.context.with_unknown_units(policy);
        self
    }

    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.registry.call_function(name, args, &self.context)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }

    pub fn functions(&self) -> Vec<FunctionMeta> {
        self.registry.functions()
    }

    pub fn get_function_meta(&self, name: &str) -> Option<FunctionMeta> {
        self.registry.get_function(name).map(|f| f.meta())
    }
}

impl Default for Imperial {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

#[macro_export]
macro_rules! args {
    () => { Vec::<$crate::Value>::new() };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}
