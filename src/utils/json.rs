use crate::errors::SdkError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Parse a JSON string whose top level must be an object.
///
/// # Errors
/// Returns `Json` for malformed input and `InvalidArgument` for a non-object top level.
pub fn parse_json_object(json: &str) -> Result<Map<String, Value>, SdkError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(m) => Ok(m),
        other => Err(SdkError::InvalidArgument(format!(
            "expected JSON object, got {}",
            kind_name(&other)
        ))),
    }
}

#[must_use]
pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a value the way it travels in a URL: strings raw, numbers in JSON form, `true` as `1`,
/// `false` and `null` as the empty string. Arrays are comma-joined element-wise.
#[must_use]
pub fn to_wire_string(v: &Value) -> String {
    match v {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_wire_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => v.to_string(),
    }
}

/// Rebuild an object with its keys in ascending order.
#[must_use]
pub fn sort_keys(map: Map<String, Value>) -> Map<String, Value> {
    let ordered: BTreeMap<String, Value> = map.into_iter().collect();
    ordered.into_iter().collect()
}
