use crate::client::Client;
use crate::errors::SdkError;
use crate::types::Representation;
use crate::utils::num::f64_to_i64_truncating;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::Model;

/// A text message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unix timestamp with fractional seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Model for Sms {
    const PATH_INFO: &'static str = "/sms";
    const NAME: &'static str = "Sms";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Sms {
    /// Save a new message built from `attributes` and return it as stored.
    ///
    /// # Errors
    /// Transport or hydration errors.
    pub fn create(client: Arc<dyn Client>, attributes: Self) -> Result<Self, SdkError> {
        let mut sms = attributes;
        sms.save(client)?;
        Ok(sms)
    }

    /// Insert when the message has no id yet, otherwise update the stored copy. `self` is
    /// refreshed from the server response.
    ///
    /// # Errors
    /// Transport or hydration errors.
    pub fn save(&mut self, client: Arc<dyn Client>) -> Result<(), SdkError> {
        let attributes = self.attributes()?;
        let stored = match self.id {
            None => {
                let created = Self::query(client).insert(Value::Object(attributes))?;
                created.into_iter().next().map(|rep| match rep.get("items") {
                    Some(Value::Array(items)) => items.first().cloned().unwrap_or(Value::Null),
                    _ => rep,
                })
            }
            Some(id) => {
                let mut q = Self::query(client);
                q.where_eq("id", id);
                q.update(&attributes)?.into_iter().next()
            }
        };
        if let Some(rep) = stored.filter(Value::is_object) {
            *self = Self::hydrate(&rep)?;
        }
        Ok(())
    }

    fn attributes(&self) -> Result<Map<String, Value>, SdkError> {
        match serde_json::to_value(self)? {
            Value::Object(m) => Ok(m),
            _ => Err(SdkError::MalformedResource("sms did not serialize to an object".into())),
        }
    }

    /// Full representation with typed fields and a self link.
    #[must_use]
    pub fn to_full_mason(&self) -> Representation {
        json!({
            "id": self.id.unwrap_or_default(),
            "created": self.created,
            "scheduled": self.scheduled,
            "direction": self.direction,
            "from": self.from,
            "to": self.to,
            "content": self.content,
            "@controls": { "self": { "href": self.self_url() } },
        })
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let ts = self.created?;
        if !ts.is_finite() {
            return None;
        }
        let secs = ts.floor();
        let nanos = f64_to_i64_truncating(((ts - secs) * 1e9).round().clamp(0.0, 999_999_999.0));
        DateTime::from_timestamp(f64_to_i64_truncating(secs), u32::try_from(nanos).ok()?)
    }
}
