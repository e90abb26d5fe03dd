use crate::errors::SdkError;
use crate::query::CompiledQuery;
use crate::query::mason::set_self_link;
use crate::types::{QueryResult, Representation};
use crate::utils::json::{kind_name, to_wire_string};
use crate::utils::num::{u64_to_usize, usize_to_u64};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use super::eval::{compare_docs, eval_query};
use super::{Client, SelectOptions, WriteOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub url: String,
    pub query: Option<CompiledQuery>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Collection {
    next_id: i64,
    rows: Vec<Value>,
}

impl Collection {
    fn add(&mut self, path: &str, body: &Value) -> Result<Value, SdkError> {
        let Value::Object(fields) = body else {
            return Err(SdkError::Transport(format!(
                "422 {path}: expected object body, got {}",
                kind_name(body)
            )));
        };
        let mut row = Value::Object(fields.clone());
        let id = match fields.get("id") {
            Some(Value::Null) | None => {
                self.next_id += 1;
                row["id"] = json!(self.next_id);
                json!(self.next_id)
            }
            Some(given) => {
                if let Some(n) = given.as_i64() {
                    self.next_id = self.next_id.max(n);
                }
                given.clone()
            }
        };
        set_self_link(&mut row, &format!("{path}/{}", to_wire_string(&id)))?;
        self.rows.push(row.clone());
        Ok(row)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.get("id").is_some_and(|v| to_wire_string(v) == id))
    }
}

#[derive(Debug, Default)]
struct State {
    collections: BTreeMap<String, Collection>,
    requests: Vec<RecordedRequest>,
    fail_after: Option<usize>,
}

impl State {
    fn record(&mut self, req: RecordedRequest) -> Result<(), SdkError> {
        let attempt = self.requests.len();
        let url = req.url.clone();
        self.requests.push(req);
        match self.fail_after {
            Some(n) if attempt >= n => Err(SdkError::Transport(format!("503 {url}: injected failure"))),
            _ => Ok(()),
        }
    }

    fn collection_mut(&mut self, path: &str) -> Result<&mut Collection, SdkError> {
        self.collections
            .get_mut(path)
            .ok_or_else(|| SdkError::Transport(format!("404 {path}: no such collection")))
    }

    /// Split `/sms/12` into the owning collection and the item id.
    fn locate(&mut self, url: &str) -> Result<(&mut Collection, String), SdkError> {
        let (path, id) = url
            .rsplit_once('/')
            .ok_or_else(|| SdkError::Transport(format!("404 {url}: not an item url")))?;
        let col = self
            .collections
            .get_mut(path)
            .ok_or_else(|| SdkError::Transport(format!("404 {url}: no such collection")))?;
        Ok((col, id.to_string()))
    }
}

/// In-process stand-in for the resource API.
///
/// Collections are keyed by their path (`/sms`); items live at `{path}/{id}` and carry a Mason
/// self link. Every call is recorded so tests can assert on the exact request sequence.
#[derive(Debug, Default)]
pub struct MemoryClient {
    state: Mutex<State>,
}

impl MemoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_collection(self, path: &str) -> Self {
        self.create_collection(path);
        self
    }

    pub fn create_collection(&self, path: &str) {
        self.state.lock().collections.entry(path.to_string()).or_default();
    }

    /// Insert rows directly, bypassing request recording and failure injection.
    ///
    /// # Errors
    /// Returns `Transport` when a row is not an object.
    pub fn seed<I>(&self, path: &str, rows: I) -> Result<Vec<Value>, SdkError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut st = self.state.lock();
        let col = st.collections.entry(path.to_string()).or_default();
        rows.into_iter().map(|r| col.add(path, &r)).collect()
    }

    /// Build a client from a fixture of the form `{"/sms": [{..}, ..], "/other": [..]}`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when the fixture is not an object of arrays.
    pub fn from_fixture(fixture: &Value) -> Result<Self, SdkError> {
        let client = Self::new();
        let map = fixture
            .as_object()
            .ok_or_else(|| SdkError::InvalidArgument("fixture must be a JSON object".into()))?;
        for (path, rows) in map {
            let rows = rows.as_array().ok_or_else(|| {
                SdkError::InvalidArgument(format!("fixture entry `{path}` must be an array"))
            })?;
            client.seed(path, rows.iter().cloned())?;
        }
        Ok(client)
    }

    /// Current contents of a collection, controls included.
    #[must_use]
    pub fn rows(&self, path: &str) -> Vec<Value> {
        self.state.lock().collections.get(path).map(|c| c.rows.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self, method: RequestMethod) -> usize {
        self.state.lock().requests.iter().filter(|r| r.method == method).count()
    }

    pub fn clear_requests(&self) {
        self.state.lock().requests.clear();
    }

    /// Let the next `n` requests succeed and fail every one after that.
    pub fn fail_after(&self, n: usize) {
        let mut st = self.state.lock();
        st.fail_after = Some(st.requests.len() + n);
    }
}

impl Client for MemoryClient {
    fn select(&self, url: &str, options: &SelectOptions) -> Result<QueryResult, SdkError> {
        let mut st = self.state.lock();
        st.record(RecordedRequest {
            method: RequestMethod::Select,
            url: url.to_string(),
            query: Some(options.query.clone()),
            body: None,
        })?;
        let col = st.collection_mut(url)?;
        let q = &options.query;
        let mut matched: Vec<&Value> = col.rows.iter().filter(|r| eval_query(r, q)).collect();
        if !q.sort.is_empty() {
            matched.sort_by(|a, b| compare_docs(a, b, &q.sort));
        }
        let total = usize_to_u64(matched.len());
        let skip = q.offset.map_or(0, u64_to_usize);
        let take = q.limit.map_or(usize::MAX, u64_to_usize);
        let items = matched.into_iter().skip(skip).take(take).cloned().collect();
        Ok(QueryResult { items, total })
    }

    fn insert(&self, url: &str, options: &WriteOptions) -> Result<Representation, SdkError> {
        let mut st = self.state.lock();
        st.record(RecordedRequest {
            method: RequestMethod::Insert,
            url: url.to_string(),
            query: None,
            body: options.json.clone(),
        })?;
        let col = st.collection_mut(url)?;
        match options.json.as_ref() {
            Some(Value::Array(rows)) => {
                let items = rows.iter().map(|r| col.add(url, r)).collect::<Result<Vec<_>, _>>()?;
                let total = usize_to_u64(items.len());
                Ok(json!({ "items": items, "total": total }))
            }
            Some(body) => col.add(url, body),
            None => Err(SdkError::Transport(format!("422 {url}: missing body"))),
        }
    }

    fn update(&self, url: &str, options: &WriteOptions) -> Result<Representation, SdkError> {
        let mut st = self.state.lock();
        st.record(RecordedRequest {
            method: RequestMethod::Update,
            url: url.to_string(),
            query: None,
            body: options.json.clone(),
        })?;
        let (col, id) = st.locate(url)?;
        let pos = col.position(&id).ok_or_else(|| SdkError::Transport(format!("404 {url}")))?;
        let mut row = match options.json.as_ref() {
            Some(Value::Object(fields)) => Value::Object(fields.clone()),
            Some(other) => {
                return Err(SdkError::Transport(format!(
                    "422 {url}: expected object body, got {}",
                    kind_name(other)
                )));
            }
            None => return Err(SdkError::Transport(format!("422 {url}: missing body"))),
        };
        row["id"] = col.rows[pos]["id"].clone();
        set_self_link(&mut row, url)?;
        col.rows[pos] = row.clone();
        Ok(row)
    }

    fn delete(&self, url: &str, options: &WriteOptions) -> Result<Value, SdkError> {
        let mut st = self.state.lock();
        st.record(RecordedRequest {
            method: RequestMethod::Delete,
            url: url.to_string(),
            query: None,
            body: options.json.clone(),
        })?;
        let (col, id) = st.locate(url)?;
        let pos = col.position(&id).ok_or_else(|| SdkError::Transport(format!("404 {url}")))?;
        col.rows.remove(pos);
        Ok(Value::Null)
    }
}
