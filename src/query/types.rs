use crate::errors::SdkError;
use crate::utils::json::to_wire_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Filter operators understood by the API, with a static value arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    Empty,
    NotEmpty,
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    StartsWith,
    EndsWith,
    Contains,
    NotStartsWith,
    NotEndsWith,
    NotContains,
    In,
    NotIn,
    Between,
    NotBetween,
}

impl Operator {
    pub const ALL: [Self; 18] = [
        Self::Empty,
        Self::NotEmpty,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Gt,
        Self::Lte,
        Self::Gte,
        Self::StartsWith,
        Self::EndsWith,
        Self::Contains,
        Self::NotStartsWith,
        Self::NotEndsWith,
        Self::NotContains,
        Self::In,
        Self::NotIn,
        Self::Between,
        Self::NotBetween,
    ];

    /// Number of values the operator expects: 0, 1 or 2.
    #[must_use]
    pub const fn arity(self) -> u8 {
        match self {
            Self::Empty | Self::NotEmpty => 0,
            Self::Between | Self::NotBetween => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NotEmpty => "not-empty",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
            Self::StartsWith => "starts-with",
            Self::EndsWith => "ends-with",
            Self::Contains => "contains",
            Self::NotStartsWith => "not-starts-with",
            Self::NotEndsWith => "not-ends-with",
            Self::NotContains => "not-contains",
            Self::In => "in",
            Self::NotIn => "not-in",
            Self::Between => "between",
            Self::NotBetween => "not-between",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = SdkError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SdkError::InvalidArgument(format!("unknown operator `{s}`")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Exactly `asc` (any case) is ascending; everything else is descending.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") { Self::Asc } else { Self::Desc }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub operator: Operator,
    pub value: Option<Value>,
}

impl Filter {
    /// `operator` alone, or `operator:value` with list values comma-joined.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.value {
            Some(v) => format!("{}:{}", self.operator, to_wire_string(v)),
            None => self.operator.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub direction: Direction,
}

/// Query parameters sent with a select call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Per column, in first-seen order; each entry is `operator[:value]`.
    pub filters: Vec<(String, Vec<String>)>,
    /// Per column, in first-seen order; a later sort on the same column replaces the earlier one.
    pub sort: Vec<(String, Direction)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl CompiledQuery {
    #[must_use]
    pub fn filters_for(&self, column: &str) -> Option<&[String]> {
        self.filters.iter().find(|(c, _)| c == column).map(|(_, v)| v.as_slice())
    }

    #[must_use]
    pub fn sort_for(&self, column: &str) -> Option<Direction> {
        self.sort.iter().find(|(c, _)| c == column).map(|(_, d)| *d)
    }

    /// Nested map form: `{"filters": {col: [..]}, "sort": {col: dir}, "limit": n, "offset": n}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        if !self.filters.is_empty() {
            let filters: Map<String, Value> = self
                .filters
                .iter()
                .map(|(c, v)| (c.clone(), Value::from(v.clone())))
                .collect();
            out.insert("filters".into(), Value::Object(filters));
        }
        if !self.sort.is_empty() {
            let sort: Map<String, Value> =
                self.sort.iter().map(|(c, d)| (c.clone(), Value::from(d.as_str()))).collect();
            out.insert("sort".into(), Value::Object(sort));
        }
        if let Some(l) = self.limit {
            out.insert("limit".into(), Value::from(l));
        }
        if let Some(o) = self.offset {
            out.insert("offset".into(), Value::from(o));
        }
        Value::Object(out)
    }

    /// Bracketed key/value pairs ready for URL encoding.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (column, entries) in &self.filters {
            for e in entries {
                pairs.push((format!("filters[{column}][]"), e.clone()));
            }
        }
        for (column, dir) in &self.sort {
            pairs.push((format!("sort[{column}]"), dir.as_str().to_string()));
        }
        if let Some(l) = self.limit {
            pairs.push(("limit".into(), l.to_string()));
        }
        if let Some(o) = self.offset {
            pairs.push(("offset".into(), o.to_string()));
        }
        pairs
    }
}
