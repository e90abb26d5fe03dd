use crate::client::{Client, MemoryClient};
use crate::config::QueryDefaults;
use crate::errors::SdkError;
use crate::query::{Builder, strip_controls};
use serde_json::{Value, json};
use std::io::{Read, Write};
use std::sync::Arc;

use super::command::{Command, QueryArgs};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

/// Apply parsed arguments to a fresh builder.
///
/// # Errors
/// `InvalidArgument` when a filter value does not fit its operator.
pub fn build_query(
    client: Arc<dyn Client>,
    defaults: &QueryDefaults,
    args: &QueryArgs,
) -> Result<Builder, SdkError> {
    let mut b = Builder::with_defaults(client, defaults.clone());
    b.from_with(args.path.clone(), args.params.iter().cloned());
    for (column, op, value) in &args.filters {
        b.filter(column.clone(), Some(*op), value.clone())?;
    }
    for (column, dir) in &args.sorts {
        b.order_by(column.clone(), dir);
    }
    if let Some(page) = args.page {
        b.for_page(page);
    }
    if let Some(l) = args.limit {
        b.limit(l);
    }
    if let Some(o) = args.offset {
        b.offset(o);
    }
    Ok(b)
}

pub fn run(cmd: Command, defaults: &QueryDefaults, out: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    run_with_format(cmd, OutputMode::Human, defaults, out)
}

pub fn run_with_format(
    cmd: Command,
    mode: OutputMode,
    defaults: &QueryDefaults,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Compile { query } => {
            // compile never sends anything; an empty client is enough
            let b = build_query(Arc::new(MemoryClient::new()), defaults, &query)?;
            let url = b.compiled_url()?;
            let compiled = b.compile_query();
            match mode {
                OutputMode::Json => {
                    writeln!(out, "{}", json!({"url": url, "query": compiled.to_json()}))?;
                }
                OutputMode::Plain => {
                    writeln!(out, "{url}")?;
                    for (k, v) in compiled.to_pairs() {
                        writeln!(out, "{k}={v}")?;
                    }
                }
                OutputMode::Human => {
                    writeln!(out, "url: {url}")?;
                    for (k, v) in compiled.to_pairs() {
                        writeln!(out, "  {k} = {v}")?;
                    }
                }
            }
            Ok(())
        }
        Command::Strip { input } => {
            let text = match input {
                Some(path) => std::fs::read_to_string(&path)?,
                None => {
                    let mut s = String::new();
                    std::io::stdin().read_to_string(&mut s)?;
                    s
                }
            };
            let doc: Value = serde_json::from_str(&text)?;
            let stripped = strip_controls(&doc);
            match mode {
                OutputMode::Plain => writeln!(out, "{stripped}")?,
                OutputMode::Json | OutputMode::Human => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&stripped)?)?;
                }
            }
            Ok(())
        }
        Command::Query { fixture, query, count } => {
            let text = std::fs::read_to_string(&fixture)?;
            let client = MemoryClient::from_fixture(&serde_json::from_str(&text)?)?;
            let mut b = build_query(Arc::new(client), defaults, &query)?;
            if count {
                let n = b.count()?;
                match mode {
                    OutputMode::Json => writeln!(out, "{}", json!({"count": n}))?,
                    _ => writeln!(out, "{n}")?,
                }
                return Ok(());
            }
            let rows = b.get()?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?,
                OutputMode::Plain => {
                    for r in &rows {
                        writeln!(out, "{r}")?;
                    }
                }
                OutputMode::Human => {
                    writeln!(out, "{} row(s)", rows.len())?;
                    for r in &rows {
                        writeln!(out, "{}", serde_json::to_string_pretty(r)?)?;
                    }
                }
            }
            Ok(())
        }
    }
}
