//! Query builder for the Phone.com REST API.
//!
//! A [`Builder`] accumulates filters, sorts and a limit/offset window for one resource
//! collection, compiles them into the API's query parameters and drives a [`Client`] transport.
//! Resources come back as JSON representations carrying Mason hypermedia controls
//! (`@controls`, `@meta`, ...), which are stripped before a resource is written back.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod query;
pub mod types;
pub mod utils;

pub use utils::logger;

pub use client::{Client, MemoryClient, SelectOptions, WriteOptions};
pub use config::{QueryDefaults, SdkConfig};
pub use errors::{Result, SdkError};
pub use models::{Model, Sms};
pub use query::{Builder, CompiledQuery, Direction, Operator, compile_url, strip_controls};
pub use types::{QueryResult, Representation, ResourceId};

use std::sync::Arc;

/// Load configuration from the usual locations and return a builder factory bound to `client`.
///
/// Logging is configured when the `[log]` table names a directory; a logger that is already
/// installed is left in place.
///
/// # Errors
/// Returns `Config`/`Toml`/`Io` errors from configuration loading.
pub fn init(client: Arc<dyn Client>) -> Result<Builder> {
    let cfg = SdkConfig::load(None)?;
    if cfg.log.dir.is_some()
        && let Err(e) = logger::configure_from_config(&cfg.log)
    {
        log::warn!("logging not configured: {e}");
    }
    Ok(Builder::with_defaults(client, cfg.query))
}
