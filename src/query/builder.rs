use crate::client::Client;
use crate::config::QueryDefaults;
use crate::errors::SdkError;
use crate::utils::num::i64_to_u64_saturating_nonnegative;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::compile::{compile_query, compile_url};
use super::types::{CompiledQuery, Direction, Filter, Operator, Sort};

/// Path template plus the parameters substituted into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub template: String,
    pub params: Vec<(String, Value)>,
}

/// Fluent query over one resource collection.
///
/// Filters, sorts and the limit/offset window accumulate on the builder; terminal operations
/// (`get`, `first`, `count`, `exists`, `chunk`, `insert*`, `update`, `delete`) turn them into
/// transport calls. Operations that override the window for their own use put the caller's
/// values back before returning, whether they succeed or fail.
///
/// ```rust,ignore
/// let rows = Builder::new(client)
///     .from("/sms")
///     .where_eq("direction", "out")
///     .order_by("created", "desc")
///     .get()?;
/// ```
#[derive(Clone)]
pub struct Builder {
    pub(super) client: Arc<dyn Client>,
    pub(super) defaults: QueryDefaults,
    pub(super) from: Option<Source>,
    pub(super) filters: Vec<Filter>,
    pub(super) sorts: Vec<Sort>,
    pub(super) limit: Option<u64>,
    pub(super) offset: Option<u64>,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("from", &self.from)
            .field("filters", &self.filters)
            .field("sorts", &self.sorts)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl Builder {
    #[must_use]
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self::with_defaults(client, QueryDefaults::default())
    }

    #[must_use]
    pub fn with_defaults(client: Arc<dyn Client>, defaults: QueryDefaults) -> Self {
        Self {
            client,
            defaults,
            from: None,
            filters: Vec::new(),
            sorts: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// A fresh builder sharing this one's transport and defaults.
    #[must_use]
    pub fn new_query(&self) -> Self {
        Self::with_defaults(Arc::clone(&self.client), self.defaults.clone())
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn Client> {
        &self.client
    }

    #[must_use]
    pub fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    // --- source ---

    pub fn from(&mut self, template: impl Into<String>) -> &mut Self {
        self.from = Some(Source { template: template.into(), params: Vec::new() });
        self
    }

    pub fn from_with<I, K, V>(&mut self, template: impl Into<String>, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let params = params.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.from = Some(Source { template: template.into(), params });
        self
    }

    // --- filters ---

    /// General filter form.
    ///
    /// With `operator = None` the value is compared for equality. With an explicit operator the
    /// value must match its arity: none for `empty`/`not-empty`, one for the comparison and set
    /// operators, a two-element list for `between`/`not-between`. `eq` also accepts no value.
    /// A JSON `null` counts as no value.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when the value does not fit the operator.
    pub fn filter(
        &mut self,
        column: impl Into<String>,
        operator: Option<Operator>,
        value: Option<Value>,
    ) -> Result<&mut Self, SdkError> {
        let value = value.filter(|v| !v.is_null());
        let operator = match operator {
            None => Operator::Eq,
            Some(op) => {
                check_arity(op, value.as_ref())?;
                op
            }
        };
        Ok(self.push_filter(column.into(), operator, value))
    }

    /// Like [`Builder::filter`] with the operator given by its wire name (`not-contains`, ...).
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an unknown operator or a value that does not fit it.
    pub fn where_str(
        &mut self,
        column: impl Into<String>,
        operator: &str,
        value: Option<Value>,
    ) -> Result<&mut Self, SdkError> {
        let op = operator.parse::<Operator>()?;
        self.filter(column, Some(op), value)
    }

    pub fn where_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let value: Value = value.into();
        let value = (!value.is_null()).then_some(value);
        self.push_filter(column.into(), Operator::Eq, value)
    }

    /// One `eq` filter per pair.
    pub fn where_map<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (k, v) in pairs {
            self.where_eq(k, v);
        }
        self
    }

    pub fn where_empty(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_filter(column.into(), Operator::Empty, None)
    }

    pub fn where_not_empty(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_filter(column.into(), Operator::NotEmpty, None)
    }

    pub fn where_in<I, V>(&mut self, column: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list = Value::Array(values.into_iter().map(Into::into).collect());
        self.push_filter(column.into(), Operator::In, Some(list))
    }

    pub fn where_not_in<I, V>(&mut self, column: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list = Value::Array(values.into_iter().map(Into::into).collect());
        self.push_filter(column.into(), Operator::NotIn, Some(list))
    }

    pub fn where_between(
        &mut self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        let range = Value::Array(vec![low.into(), high.into()]);
        self.push_filter(column.into(), Operator::Between, Some(range))
    }

    pub fn where_not_between(
        &mut self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        let range = Value::Array(vec![low.into(), high.into()]);
        self.push_filter(column.into(), Operator::NotBetween, Some(range))
    }

    fn push_filter(&mut self, column: String, operator: Operator, value: Option<Value>) -> &mut Self {
        self.filters.push(Filter { column, operator, value });
        self
    }

    // --- sorting ---

    /// `asc` in any case sorts ascending; every other direction string sorts descending.
    pub fn order_by(&mut self, column: impl Into<String>, direction: &str) -> &mut Self {
        self.push_sort(column.into(), Direction::parse_lenient(direction))
    }

    pub fn order_by_asc(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_sort(column.into(), Direction::Asc)
    }

    pub fn order_by_desc(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_sort(column.into(), Direction::Desc)
    }

    fn push_sort(&mut self, column: String, direction: Direction) -> &mut Self {
        self.sorts.push(Sort { column, direction });
        self
    }

    // --- window ---

    /// Negative offsets clamp to zero.
    pub fn offset(&mut self, value: i64) -> &mut Self {
        self.offset = Some(i64_to_u64_saturating_nonnegative(value));
        self
    }

    pub fn skip(&mut self, value: i64) -> &mut Self {
        self.offset(value)
    }

    /// Non-positive limits are ignored and leave the current limit in place.
    pub fn limit(&mut self, value: i64) -> &mut Self {
        if value > 0 {
            self.limit = Some(i64_to_u64_saturating_nonnegative(value));
        }
        self
    }

    pub fn take(&mut self, value: i64) -> &mut Self {
        self.limit(value)
    }

    /// Window for a 1-based page using the configured page length.
    pub fn for_page(&mut self, page: u64) -> &mut Self {
        let per_page = self.defaults.per_page;
        self.for_page_with(page, per_page)
    }

    pub fn for_page_with(&mut self, page: u64, per_page: u64) -> &mut Self {
        let start = page.saturating_sub(1).saturating_mul(per_page);
        self.offset = Some(start);
        if per_page > 0 {
            self.limit = Some(per_page);
        }
        self
    }

    // --- inspection ---

    #[must_use]
    pub fn source(&self) -> Option<&Source> {
        self.from.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    #[must_use]
    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    #[must_use]
    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    /// Query parameters for the current state.
    #[must_use]
    pub fn compile_query(&self) -> CompiledQuery {
        compile_query(&self.filters, &self.sorts, self.limit, self.offset)
    }

    /// Concrete collection URL.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when no source was set.
    pub fn compiled_url(&self) -> Result<String, SdkError> {
        let src = self
            .from
            .as_ref()
            .ok_or_else(|| SdkError::InvalidArgument("query has no source; call from() first".into()))?;
        compile_url(&src.template, src.params.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

fn check_arity(op: Operator, value: Option<&Value>) -> Result<(), SdkError> {
    match (op.arity(), value) {
        (0, Some(_)) => Err(SdkError::InvalidArgument(format!("operator `{op}` takes no value"))),
        (0, None) => Ok(()),
        (_, None) if op == Operator::Eq => Ok(()),
        (_, None) => Err(SdkError::InvalidArgument(format!(
            "Illegal operator and value combination: `{op}` requires a value"
        ))),
        (2, Some(Value::Array(pair))) if pair.len() == 2 => Ok(()),
        (2, Some(_)) => Err(SdkError::InvalidArgument(format!(
            "operator `{op}` requires a list of exactly two values"
        ))),
        _ => Ok(()),
    }
}
