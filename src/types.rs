use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A resource as returned by the API: an untyped JSON tree that may carry
/// `@`-prefixed hypermedia controls at any depth.
pub type Representation = Value;

/// One page of a select call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub items: Vec<Representation>,
    /// Server-side match count, independent of the page size requested.
    pub total: u64,
}

/// Identifier extracted from an insert response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceId {
    Int(i64),
    Raw(Value),
}

impl ResourceId {
    /// Numbers and numeric strings become `Int` (fraction truncated); anything else is kept raw.
    #[must_use]
    pub fn from_value(v: Value) -> Self {
        match &v {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Self::Int(i);
                }
                if let Some(f) = n.as_f64() {
                    return Self::Int(crate::utils::num::f64_to_i64_truncating(f));
                }
                Self::Raw(v)
            }
            Value::String(s) => {
                let t = s.trim();
                if let Ok(i) = t.parse::<i64>() {
                    return Self::Int(i);
                }
                match t.parse::<f64>() {
                    Ok(f) if f.is_finite() => Self::Int(crate::utils::num::f64_to_i64_truncating(f)),
                    _ => Self::Raw(v),
                }
            }
            _ => Self::Raw(v),
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Raw(Value::String(s)) => f.write_str(s),
            Self::Raw(v) => write!(f, "{v}"),
        }
    }
}
