//! Transport contract consumed by the query builder.
//!
//! The builder never talks HTTP itself. Anything that can answer these four calls (a real HTTP
//! client, a recording fake, the bundled [`MemoryClient`]) can back a [`crate::query::Builder`].

mod eval;
mod memory;

pub use eval::{eval_entry, eval_query};
pub use memory::{MemoryClient, RecordedRequest, RequestMethod};

use crate::errors::SdkError;
use crate::query::CompiledQuery;
use crate::types::{QueryResult, Representation};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub query: CompiledQuery,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOptions {
    /// Request body; `None` for body-less calls such as delete.
    pub json: Option<Value>,
}

impl WriteOptions {
    #[must_use]
    pub fn json(body: Value) -> Self {
        Self { json: Some(body) }
    }
}

/// A resource API transport. Calls block until the response (or error) arrives.
pub trait Client: Send + Sync {
    /// # Errors
    /// Transport-defined; the builder propagates them unchanged.
    fn select(&self, url: &str, options: &SelectOptions) -> Result<QueryResult, SdkError>;

    /// # Errors
    /// Transport-defined; the builder propagates them unchanged.
    fn insert(&self, url: &str, options: &WriteOptions) -> Result<Representation, SdkError>;

    /// # Errors
    /// Transport-defined; the builder propagates them unchanged.
    fn update(&self, url: &str, options: &WriteOptions) -> Result<Representation, SdkError>;

    /// # Errors
    /// Transport-defined; the builder propagates them unchanged.
    fn delete(&self, url: &str, options: &WriteOptions) -> Result<Value, SdkError>;
}
