use crate::client::{SelectOptions, WriteOptions};
use crate::errors::SdkError;
use crate::request_trace;
use crate::types::{QueryResult, Representation, ResourceId};
use crate::utils::json::{kind_name, sort_keys};
use crate::utils::num::usize_to_u64;
use serde_json::{Map, Value};
use std::ops::ControlFlow;
use std::sync::Arc;

use super::builder::Builder;
use super::mason::{self_link, strip_controls};

impl Builder {
    fn run_select(&self) -> Result<QueryResult, SdkError> {
        let url = self.compiled_url()?;
        let options = SelectOptions { query: self.compile_query() };
        request_trace!("select {url} {}", options.query.to_json());
        let page = self.client.select(&url, &options)?;
        log::debug!("select {url}: {} item(s), total {}", page.items.len(), page.total);
        Ok(page)
    }

    /// Run `f` and put the caller's limit/offset back afterwards, on success and on error.
    fn with_window<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SdkError>,
    ) -> Result<T, SdkError> {
        let (limit, offset) = (self.limit, self.offset);
        let out = f(self);
        self.limit = limit;
        self.offset = offset;
        out
    }

    /// All matching representations.
    ///
    /// Without an explicit limit, pages of `page_size` are requested until a short page comes
    /// back. With a limit set, exactly one page is requested.
    ///
    /// # Errors
    /// Transport errors propagate; a query without a source is `InvalidArgument`.
    pub fn get(&mut self) -> Result<Vec<Representation>, SdkError> {
        self.with_window(|b| {
            let explicit = b.limit.is_some();
            let page_len = b.limit.unwrap_or(b.defaults.page_size).max(1);
            let mut offset = b.offset.unwrap_or(0);
            b.limit = Some(page_len);
            let mut items = Vec::new();
            loop {
                b.offset = Some(offset);
                let page = b.run_select()?;
                let n = usize_to_u64(page.items.len());
                items.extend(page.items);
                offset = offset.saturating_add(page_len);
                if explicit || n != page_len {
                    break;
                }
            }
            Ok(items)
        })
    }

    /// One select with the current state, total included.
    ///
    /// # Errors
    /// Transport errors propagate.
    pub fn get_with_total(&self) -> Result<QueryResult, SdkError> {
        self.run_select()
    }

    /// # Errors
    /// Transport errors propagate.
    pub fn first(&mut self) -> Result<Option<Representation>, SdkError> {
        self.with_window(|b| {
            b.take(1);
            Ok(b.get()?.into_iter().next())
        })
    }

    /// Adds an `id` equality filter, then behaves like [`Builder::first`].
    ///
    /// # Errors
    /// Transport errors propagate.
    pub fn find(&mut self, id: impl Into<Value>) -> Result<Option<Representation>, SdkError> {
        self.where_eq("id", id);
        self.first()
    }

    /// Server-reported number of matches.
    ///
    /// # Errors
    /// Transport errors propagate.
    pub fn count(&mut self) -> Result<u64, SdkError> {
        self.with_window(|b| {
            b.limit = Some(1);
            Ok(b.run_select()?.total)
        })
    }

    /// # Errors
    /// Transport errors propagate.
    pub fn exists(&mut self) -> Result<bool, SdkError> {
        let saved = self.limit;
        self.limit = Some(1);
        let counted = self.count();
        self.limit = saved;
        Ok(counted? > 0)
    }

    /// Walk every match in pages of `size`, handing each page to `callback`.
    ///
    /// Stops after a short page or when the callback breaks. Errors from the callback propagate
    /// and end the walk.
    ///
    /// # Errors
    /// Transport or callback errors.
    pub fn chunk<F>(&mut self, size: u64, mut callback: F) -> Result<(), SdkError>
    where
        F: FnMut(&[Representation]) -> Result<ControlFlow<()>, SdkError>,
    {
        let size = size.max(1);
        self.with_window(|b| {
            let mut offset = 0u64;
            loop {
                b.limit = Some(size);
                b.offset = Some(offset);
                let page = b.get()?;
                let flow = callback(&page)?;
                if flow.is_break() || usize_to_u64(page.len()) != size {
                    break;
                }
                offset = offset.saturating_add(size);
            }
            Ok(())
        })
    }

    /// Create one resource per row.
    ///
    /// An object is one row. An array of objects is many rows, each sent with its keys sorted.
    /// An array whose first element is not an object is sent as a single body. Empty input sends
    /// nothing.
    ///
    /// # Errors
    /// `InvalidArgument` for scalar input; transport errors propagate and stop the remaining rows.
    pub fn insert(&self, values: Value) -> Result<Vec<Representation>, SdkError> {
        let rows = match values {
            Value::Object(m) if m.is_empty() => return Ok(Vec::new()),
            Value::Array(a) if a.is_empty() => return Ok(Vec::new()),
            Value::Object(m) => vec![Value::Object(m)],
            Value::Array(a) if a.first().is_some_and(Value::is_object) => a
                .into_iter()
                .map(|row| match row {
                    Value::Object(m) => Value::Object(sort_keys(m)),
                    other => other,
                })
                .collect(),
            Value::Array(a) => vec![Value::Array(a)],
            other => {
                return Err(SdkError::InvalidArgument(format!(
                    "insert expects an object or an array, got {}",
                    kind_name(&other)
                )));
            }
        };
        let url = self.compiled_url()?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            request_trace!("insert {url}");
            out.push(self.client.insert(&url, &WriteOptions::json(row))?);
        }
        log::debug!("insert {url}: {} row(s)", out.len());
        Ok(out)
    }

    /// Insert one row and read the identifier field from the response.
    ///
    /// # Errors
    /// `MissingField` when the response lacks `sequence` (default `id`).
    pub fn insert_get_id(&self, values: Value, sequence: Option<&str>) -> Result<ResourceId, SdkError> {
        let url = self.compiled_url()?;
        let field = sequence.unwrap_or(&self.defaults.sequence);
        request_trace!("insert {url}");
        let data = self.client.insert(&url, &WriteOptions::json(values))?;
        let id = data.get(field).cloned().ok_or_else(|| SdkError::MissingField(field.to_string()))?;
        Ok(ResourceId::from_value(id))
    }

    /// Send the whole list as one request; returns the created `items`.
    ///
    /// # Errors
    /// `MissingField` when the response has no `items`; `MalformedResource` when it is not a list.
    pub fn insert_collection(&self, values: Vec<Value>) -> Result<Vec<Representation>, SdkError> {
        let url = self.compiled_url()?;
        request_trace!("insert {url} [{}]", values.len());
        let data = self.client.insert(&url, &WriteOptions::json(Value::Array(values)))?;
        match data.get("items") {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(SdkError::MalformedResource(format!(
                "insert response `items` is {}, expected an array",
                kind_name(other)
            ))),
            None => Err(SdkError::MissingField("items".into())),
        }
    }

    /// Rewrite every match: fetched fields without controls, with `values` laid on top.
    ///
    /// Rows are fetched in batches and each one is sent to its own self link.
    ///
    /// # Errors
    /// `MalformedResource` for a row without a self link; transport errors propagate.
    pub fn update(&mut self, values: &Map<String, Value>) -> Result<Vec<Representation>, SdkError> {
        let client = Arc::clone(&self.client);
        let size = self.defaults.chunk_size;
        let mut out = Vec::new();
        self.chunk(size, |rows| {
            for existing in rows {
                let url = self_link(existing)?;
                let mut body = match strip_controls(existing) {
                    Value::Object(m) => m,
                    other => {
                        return Err(SdkError::MalformedResource(format!(
                            "cannot update {url}: representation is {}",
                            kind_name(&other)
                        )));
                    }
                };
                for (k, v) in values {
                    body.insert(k.clone(), v.clone());
                }
                request_trace!("update {url}");
                out.push(client.update(url, &WriteOptions::json(Value::Object(body)))?);
            }
            Ok(ControlFlow::Continue(()))
        })?;
        log::debug!("update: {} row(s)", out.len());
        Ok(out)
    }

    /// Delete every match, or only the one with `id` when given.
    ///
    /// Self links are collected across all batches before the first delete is sent, so removing
    /// rows cannot shift later pages.
    ///
    /// # Errors
    /// `MalformedResource` for a row without a self link; transport errors propagate.
    pub fn delete(&mut self, id: Option<Value>) -> Result<bool, SdkError> {
        if let Some(id) = id {
            self.where_eq("id", id);
        }
        let size = self.defaults.chunk_size;
        let mut links = Vec::new();
        self.chunk(size, |rows| {
            for row in rows {
                links.push(self_link(row)?.to_string());
            }
            Ok(ControlFlow::Continue(()))
        })?;
        for url in &links {
            request_trace!("delete {url}");
            self.client.delete(url, &WriteOptions::default())?;
        }
        log::debug!("delete: {} row(s)", links.len());
        Ok(true)
    }
}
