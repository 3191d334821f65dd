//! Request dispatch
//!
//! Tools are generated from the registry metadata, so a function added to
//! the library shows up here without changes.

use crate::protocol::{
    McpError, McpRequest, McpResponse, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
use imperial::units::{guide_markdown, LENGTH_UNITS, PIVOT};
use imperial::{FunctionMeta, Imperial, Value};
use serde_json::{json, Map, Value as JsonValue};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "imperial";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const GUIDE_URI: &str = "imperial://guide";
const UNITS_URI: &str = "imperial://units";

/// Handle one line of input. `None` means nothing is written back: blank
/// lines, notifications, and replies that failed to serialize.
pub fn handle_line(imperial: &Imperial, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    debug!(bytes = line.len(), "received");

    let response = match parse_request(line) {
        Ok(request) => {
            let response = handle_request(imperial, &request);
            if request.id.is_none() {
                debug!(method = %request.method, "notification processed");
                return None;
            }
            debug!(method = %request.method, "responding");
            response
        }
        Err(rejection) => rejection,
    };

    match serde_json::to_string(&response) {
        Ok(json) => Some(json),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            None
        }
    }
}

/// Malformed JSON is a parse error. Well-formed JSON that is not a request
/// is an invalid request, answered with its id when one can be read.
fn parse_request(line: &str) -> Result<McpRequest, McpResponse> {
    let raw: JsonValue = serde_json::from_str(line).map_err(|e| {
        warn!(error = %e, "unparsable request");
        let err = McpError::new(PARSE_ERROR, format!("Parse error: {}", e));
        McpResponse::from_result(JsonValue::Null, Err(err))
    })?;

    let id = raw.get("id").cloned().unwrap_or(JsonValue::Null);
    let invalid = |message: String| {
        warn!(%message, "invalid request");
        McpResponse::from_result(id.clone(), Err(McpError::new(INVALID_REQUEST, message)))
    };

    let request: McpRequest = serde_json::from_value(raw)
        .map_err(|e| invalid(format!("Invalid request: {}", e)))?;
    if request.jsonrpc != "2.0" {
        return Err(invalid(format!("Unsupported jsonrpc version: {}", request.jsonrpc)));
    }
    Ok(request)
}

fn handle_request(imperial: &Imperial, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        "initialize" => handle_initialize(imperial, &request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        "tools/list" => handle_tools_list(imperial),
        "tools/call" => handle_tool_call(imperial, &request.params),

        "resources/list" => handle_resources_list(),
        "resources/read" => handle_resources_read(&request.params),

        _ => Err(McpError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )),
    };

    McpResponse::from_result(request.id.clone().unwrap_or(JsonValue::Null), result)
}

fn handle_initialize(
    imperial: &Imperial,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let client = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's version when it sends one
    let protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client, protocol, "client connected");

    Ok(json!({
        "protocolVersion": protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Length conversion between historical and imperial units"
        },
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false }
        },
        "instructions": format!(
            "Converts lengths between {} historical and imperial units through meters. \
             Call list_units for the names, convert for numbers and convert_input for \
             display-ready text. Results are formatted for locale {}.",
            LENGTH_UNITS.len(),
            imperial.context().locale
        )
    }))
}

fn handle_tools_list(imperial: &Imperial) -> Result<JsonValue, McpError> {
    let mut tools: Vec<JsonValue> = imperial.functions().iter().map(tool_schema).collect();
    tools.push(json!({
        "name": "help",
        "description": "Documentation for one function, or an overview of all of them.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Function name. Omit for general help."
                }
            }
        }
    }));
    Ok(json!({ "tools": tools }))
}

fn tool_schema(meta: &FunctionMeta) -> JsonValue {
    let mut properties = Map::new();
    for arg in meta.args {
        let mut prop = json!({
            "type": json_type(arg.typ),
            "description": arg.description,
        });
        if let Some(default) = arg.default {
            prop["default"] = json!(default);
        }
        properties.insert(arg.name.to_string(), prop);
    }
    let required: Vec<&str> = meta.args.iter().filter(|a| !a.optional).map(|a| a.name).collect();

    json!({
        "name": meta.name,
        "description": format!("{} Usage: {}", meta.description, meta.usage),
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}

fn json_type(typ: &str) -> &'static str {
    match typ {
        "Number" => "number",
        "Bool" => "boolean",
        "List" => "array",
        "Object" => "object",
        _ => "string",
    }
}

fn handle_tool_call(
    imperial: &Imperial,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    if name == "help" {
        let topic = arguments.get("name").and_then(|v| v.as_str());
        let help = imperial.help(topic);
        return Ok(tool_result(&help, format_help(&help)));
    }

    let meta = imperial
        .get_function_meta(name)
        .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {}", name)))?;

    let args = collect_args(&meta, &arguments)?;
    debug!(tool = name, args = args.len(), "calling tool");

    let value = imperial.call(name, &args);
    let text = format_value(&value);
    Ok(tool_result(&value, text))
}

/// Positional arguments in `ArgMeta` order. Stops at the first absent
/// optional argument.
fn collect_args(meta: &FunctionMeta, arguments: &JsonValue) -> Result<Vec<Value>, McpError> {
    let mut args = Vec::with_capacity(meta.args.len());
    for arg in meta.args {
        match arguments.get(arg.name).filter(|v| !v.is_null()) {
            Some(json) => args.push(json_to_value(json)),
            None if arg.optional => break,
            None => {
                return Err(McpError::invalid_params(format!(
                    "Missing required argument '{}' for {}",
                    arg.name, meta.name
                ))
                .with_data(json!({ "usage": meta.usage })));
            }
        }
    }
    Ok(args)
}

fn tool_result(value: &Value, text: String) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": value_to_json(value),
        "isError": value.is_error()
    })
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "No result".to_string(),
        Value::List(items) => items.iter().map(format_value).collect::<Vec<_>>().join("\n"),
        Value::Object(_) => serde_json::to_string_pretty(&value_to_json(value)).unwrap_or_default(),
        Value::Error(e) => e.to_string(),
    }
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) if map.contains_key("name") => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") {
                out.push_str(&format!("# {}\n\n", n));
            }
            if let Some(Value::Text(d)) = map.get("description") {
                out.push_str(&format!("{}\n\n", d));
            }
            if let Some(Value::Text(u)) = map.get("usage") {
                out.push_str(&format!("**Usage:** `{}`\n", u));
            }
            out
        }
        Value::Object(map) => {
            let mut out = String::from("# Imperial functions\n");
            if let Some(Value::Object(categories)) = map.get("functions") {
                let mut names: Vec<&String> = categories.keys().collect();
                names.sort();
                for category in names {
                    out.push_str(&format!("\n## {}\n", category));
                    if let Some(Value::List(funcs)) = categories.get(category) {
                        for f in funcs {
                            out.push_str(&format!("- {}\n", f));
                        }
                    }
                }
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => format_value(other),
    }
}

fn handle_resources_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "resources": [
            {
                "uri": GUIDE_URI,
                "name": "Conversion Guide",
                "description": "How many meters each unit spans",
                "mimeType": "text/markdown"
            },
            {
                "uri": UNITS_URI,
                "name": "Unit Table",
                "description": "Supported units with their factors in meters",
                "mimeType": "application/json"
            }
        ]
    }))
}

fn handle_resources_read(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let uri = params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing uri parameter"))?;

    let (mime, text) = match uri {
        GUIDE_URI => ("text/markdown", guide_markdown()),
        UNITS_URI => {
            let table = json!({
                "pivot": PIVOT,
                "units": LENGTH_UNITS,
            });
            ("application/json", serde_json::to_string_pretty(&table).unwrap_or_default())
        }
        _ => {
            return Err(McpError::invalid_params(format!(
                "Unknown resource: {}. Expected {} or {}",
                uri, GUIDE_URI, UNITS_URI
            )))
        }
    };

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": mime,
            "text": text
        }]
    }))
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(arr) => Value::List(arr.iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => {
            Value::Object(obj.iter().map(|(k, v)| (k.clone(), json_to_value(v))).collect())
        }
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        // NaN and infinities have no JSON number
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map_or_else(|| JsonValue::String(n.to_string()), JsonValue::Number),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(l) => JsonValue::Array(l.iter().map(value_to_json).collect()),
        Value::Object(o) => {
            JsonValue::Object(o.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect())
        }
        Value::Error(e) => json!({ "_error": e }),
    }
}
