use serde_json::Value;
use std::path::PathBuf;

use crate::query::Operator;

/// Query shape shared by `compile` and `query`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryArgs {
    pub path: String,
    pub params: Vec<(String, Value)>,
    pub filters: Vec<(String, Operator, Option<Value>)>,
    pub sorts: Vec<(String, String)>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the concrete URL and query parameters without sending anything.
    Compile { query: QueryArgs },
    /// Remove hypermedia controls from a JSON document; reads stdin when `input` is `None`.
    Strip { input: Option<PathBuf> },
    /// Run the query against a JSON fixture served from memory.
    Query { fixture: PathBuf, query: QueryArgs, count: bool },
}
