//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use imperial_core::{similar_names, ImperialError, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Central plugin registry
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    /// Metadata of every registered function, sorted by name
    pub fn functions(&self) -> Vec<FunctionMeta> {
        let mut metas: Vec<FunctionMeta> = self.functions.values().map(|f| f.meta()).collect();
        metas.sort_by(|a, b| a.name.cmp(b.name));
        metas
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => {
                debug!(function = name, args = args.len(), "calling function");
                f.call(args, ctx)
            }
            None => {
                let similar = similar_names(name, self.functions.keys().map(|k| k.as_str()));
                let mut err = ImperialError::undefined_func(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.into_iter().take(5).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use help() for full list.",
                        suggestions.join(", ")
                    ));
                }
                Value::Error(err)
            }
        }
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.get_function(name) {
            Some(f) => Value::Object(function_to_help(f.meta())),
            None => Value::Error(ImperialError::not_found(name)),
        }
    }

    fn general_help(&self) -> Value {
        let mut funcs_by_cat: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for meta in self.functions() {
            funcs_by_cat
                .entry(meta.category.to_string())
                .or_default()
                .push(meta.name.to_string());
        }

        let mut help = HashMap::new();
        help.insert(
            "functions".to_string(),
            Value::Object(
                funcs_by_cat
                    .into_iter()
                    .map(|(k, v)| (k, Value::List(v.into_iter().map(Value::Text).collect())))
                    .collect(),
            ),
        );
        help.insert(
            "usage".to_string(),
            Value::Text("Call help('function_name') for detailed help.".to_string()),
        );

        Value::Object(help)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        let funcs: Vec<Value> = self
            .functions()
            .into_iter()
            .filter(|meta| category.map_or(true, |c| meta.category == c))
            .map(|meta| {
                let mut obj = HashMap::new();
                obj.insert("name".to_string(), Value::Text(meta.name.to_string()));
                obj.insert("description".to_string(), Value::Text(meta.description.to_string()));
                obj.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
                obj.insert("category".to_string(), Value::Text(meta.category.to_string()));
                Value::Object(obj)
            })
            .collect();
        Value::List(funcs)
    }
}

fn function_to_help(meta: FunctionMeta) -> HashMap<String, Value> {
    let mut help = HashMap::new();
    help.insert("name".to_string(), Value::Text(meta.name.to_string()));
    help.insert("type".to_string(), Value::Text("function".to_string()));
    help.insert("description".to_string(), Value::Text(meta.description.to_string()));
    help.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
    help.insert("returns".to_string(), Value::Text(meta.returns.to_string()));
    help.insert("category".to_string(), Value::Text(meta.category.to_string()));
    help.insert(
        "args".to_string(),
        Value::List(
            meta.args
                .iter()
                .map(|a| {
                    let mut arg = HashMap::new();
                    arg.insert("name".to_string(), Value::Text(a.name.to_string()));
                    arg.insert("type".to_string(), Value::Text(a.typ.to_string()));
                    arg.insert("description".to_string(), Value::Text(a.description.to_string()));
                    arg.insert("optional".to_string(), Value::Bool(a.optional));
                    Value::Object(arg)
                })
                .collect(),
        ),
    );
    help.insert(
        "examples".to_string(),
        Value::List(meta.examples.iter().map(|e| Value::Text(e.to_string())).collect()),
    );
    help.insert(
        "related".to_string(),
        Value::List(meta.related.iter().map(|r| Value::Text(r.to_string())).collect()),
    );
    help
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgMeta;
    use imperial_core::codes;

    struct Echo;

    static ECHO_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Text", "Text to echo")];

    impl FunctionPlugin for Echo {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "echo",
                description: "Return the argument unchanged",
                usage: "echo(value)",
                args: &ECHO_ARGS,
                returns: "Text",
                examples: &[],
                category: "test",
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            args.first().cloned().unwrap_or(Value::Null)
        }
    }

    fn registry() -> PluginRegistry {
        PluginRegistry::new().with_function(Echo)
    }

    #[test]
    fn test_call_is_case_insensitive() {
        let ctx = EvalContext::new();
        let result = registry().call_function("ECHO", &[Value::from("hi")], &ctx);
        assert_eq!(result, Value::from("hi"));
    }

    #[test]
    fn test_unknown_function_suggests() {
        let ctx = EvalContext::new();
        let result = registry().call_function("ech", &[], &ctx);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::UNDEFINED_FUNC);
        assert!(err.suggestion.as_ref().unwrap().contains("echo"));
    }

    #[test]
    fn test_help_for_function() {
        let help = registry().help(Some("echo"));
        let obj = help.as_object().unwrap();
        assert_eq!(obj.get("usage"), Some(&Value::from("echo(value)")));
        assert_eq!(obj.get("args").and_then(|a| a.as_list()).map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_help_missing() {
        let help = registry().help(Some("nothing"));
        assert_eq!(help.as_error().unwrap().code, codes::NOT_FOUND);
    }

    #[test]
    fn test_general_help_groups_by_category() {
        let help = registry().help(None);
        let funcs = help.as_object().unwrap().get("functions").unwrap();
        let test_cat = funcs.as_object().unwrap().get("test").unwrap();
        assert_eq!(test_cat, &Value::List(vec![Value::from("echo")]));
    }

    #[test]
    fn test_list_functions_filters_category() {
        let reg = registry();
        assert_eq!(reg.list_functions(Some("test")).as_list().unwrap().len(), 1);
        assert!(reg.list_functions(Some("units")).as_list().unwrap().is_empty());
        assert_eq!(reg.functions()[0].required_args(), 1);
    }
}
