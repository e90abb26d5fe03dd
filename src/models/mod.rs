//! Typed views over API resources.

mod sms;

pub use sms::Sms;

use crate::client::Client;
use crate::errors::SdkError;
use crate::query::{Builder, strip_controls};
use crate::types::Representation;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// A resource type living under a fixed collection path.
pub trait Model: Serialize + DeserializeOwned + Sized {
    /// Collection path, e.g. `/sms`.
    const PATH_INFO: &'static str;
    /// Name reported by `NotFound`.
    const NAME: &'static str;

    fn id(&self) -> Option<i64>;

    /// Builder scoped to this model's collection.
    fn query(client: Arc<dyn Client>) -> Builder {
        let mut b = Builder::new(client);
        b.from(Self::PATH_INFO);
        b
    }

    /// Build a model from a fetched representation; controls are dropped first.
    ///
    /// # Errors
    /// `Json` when the fields do not fit the model.
    fn hydrate(rep: &Representation) -> Result<Self, SdkError> {
        Ok(serde_json::from_value(strip_controls(rep))?)
    }

    /// # Errors
    /// Transport or hydration errors.
    fn all(client: Arc<dyn Client>) -> Result<Vec<Self>, SdkError> {
        Self::query(client).get()?.iter().map(Self::hydrate).collect()
    }

    /// # Errors
    /// Transport or hydration errors.
    fn find(client: Arc<dyn Client>, id: i64) -> Result<Option<Self>, SdkError> {
        Self::query(client).find(id)?.as_ref().map(Self::hydrate).transpose()
    }

    /// # Errors
    /// `NotFound` when no resource has `id`.
    fn find_or_fail(client: Arc<dyn Client>, id: i64) -> Result<Self, SdkError> {
        Self::find(client, id)?.ok_or_else(|| SdkError::not_found(Self::NAME))
    }

    /// `{PATH_INFO}/{id}`, or the collection path for an unsaved model.
    fn self_url(&self) -> String {
        match self.id() {
            Some(id) => format!("{}/{id}", Self::PATH_INFO),
            None => Self::PATH_INFO.to_string(),
        }
    }
}
