//! Mason hypermedia helpers.
//!
//! Control properties (`@controls`, `@meta`, `@namespaces`, ...) are server-owned metadata. They are
//! removed before a fetched resource is sent back as an update body.

use crate::errors::SdkError;
use serde_json::{Map, Value};

pub const CONTROL_PREFIX: char = '@';

#[inline]
#[must_use]
pub fn is_control_key(key: &str) -> bool {
    key.starts_with(CONTROL_PREFIX)
}

/// Return a copy of `value` with every `@`-prefixed key removed at every depth.
#[must_use]
pub fn strip_controls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| !is_control_key(k))
                .map(|(k, v)| (k.clone(), strip_controls(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_controls).collect()),
        other => other.clone(),
    }
}

/// In-place variant of [`strip_controls`].
pub fn strip_controls_in_place(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|k, _| !is_control_key(k));
            for v in map.values_mut() {
                strip_controls_in_place(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_controls_in_place),
        _ => {}
    }
}

/// True when no key at any depth starts with `@`.
#[must_use]
pub fn has_no_controls(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.iter().all(|(k, v)| !is_control_key(k) && has_no_controls(v)),
        Value::Array(items) => items.iter().all(has_no_controls),
        _ => true,
    }
}

/// `@controls.self.href` of a resource.
///
/// # Errors
/// Returns `MalformedResource` when any level of that path is missing or the href is not a string.
pub fn self_link(resource: &Value) -> Result<&str, SdkError> {
    resource
        .get("@controls")
        .and_then(|c| c.get("self"))
        .and_then(|s| s.get("href"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            let id = resource.get("id").map_or_else(|| "?".to_string(), ToString::to_string);
            SdkError::MalformedResource(format!("resource {id} has no @controls.self.href"))
        })
}

/// Attach a self link under `@controls`, creating the controls object when needed.
///
/// # Errors
/// Returns `MalformedResource` when `resource` is not an object.
pub fn set_self_link(resource: &mut Value, href: &str) -> Result<(), SdkError> {
    let obj = resource
        .as_object_mut()
        .ok_or_else(|| SdkError::MalformedResource("only objects carry controls".into()))?;
    let controls = obj.entry("@controls").or_insert_with(|| Value::Object(Map::new()));
    match controls {
        Value::Object(c) => {
            c.insert("self".into(), serde_json::json!({ "href": href }));
            Ok(())
        }
        _ => Err(SdkError::MalformedResource("@controls is not an object".into())),
    }
}
