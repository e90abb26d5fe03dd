use crate::errors::SdkError;
use crate::query::Operator;
use serde_json::Value;

use super::runner::OutputMode;

/// Interpret a command-line literal: JSON when it parses as JSON, otherwise the raw string.
#[must_use]
pub fn parse_scalar(s: &str) -> Value {
    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
}

/// `column:operator[:value]`. List operators take comma-separated values.
///
/// # Errors
/// `InvalidArgument` for a missing column or operator, or an unknown operator.
pub fn parse_filter_expr(s: &str) -> Result<(String, Operator, Option<Value>), SdkError> {
    let mut parts = s.splitn(3, ':');
    let column = parts.next().unwrap_or_default().trim();
    let op = parts.next().map(str::trim).unwrap_or_default();
    if column.is_empty() || op.is_empty() {
        return Err(SdkError::InvalidArgument(format!("filter `{s}`: expected column:operator[:value]")));
    }
    let op = op.parse::<Operator>()?;
    let value = parts.next().map(|raw| match op {
        Operator::In | Operator::NotIn | Operator::Between | Operator::NotBetween => {
            Value::Array(raw.split(',').map(parse_scalar).collect())
        }
        _ => parse_scalar(raw),
    });
    Ok((column.to_string(), op, value))
}

/// `name=value`.
///
/// # Errors
/// `InvalidArgument` when `=` is missing or the name is empty.
pub fn parse_param(s: &str) -> Result<(String, Value), SdkError> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), parse_scalar(v))),
        _ => Err(SdkError::InvalidArgument(format!("parameter `{s}`: expected name=value"))),
    }
}

/// `column[:direction]`, ascending by default.
#[must_use]
pub fn parse_sort(s: &str) -> (String, String) {
    match s.split_once(':') {
        Some((c, d)) => (c.trim().to_string(), d.trim().to_string()),
        None => (s.trim().to_string(), "asc".to_string()),
    }
}

#[must_use]
pub fn parse_output_mode(s: Option<&str>) -> OutputMode {
    match s.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        Some("plain") => OutputMode::Plain,
        _ => OutputMode::Human,
    }
}
