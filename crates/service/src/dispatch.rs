//! Request dispatcher: resolves `{method, version, fields}` to exactly one storage call.
//!
//! `v1` and `v2` share storage semantics and differ only in how the owning user is
//! resolved: `v2` requires an explicit `userId`, `v1` falls back to the anonymous
//! (empty) partition when none is given.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use models::{Item, NewItem, Priority};

use crate::errors::StoreError;
use crate::storage::ItemStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl FromStr for ApiVersion {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(ApiVersion::V1),
            "v2" => Ok(ApiVersion::V2),
            other => Err(DispatchError::InvalidRequest(format!("unsupported api version '{other}' (expected v1 or v2)"))),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        })
    }
}

/// Loosely-typed field set as received from a transport. Every field is optional here;
/// which ones are required depends on the method.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    #[serde(default, alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub complete: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ItemRequest {
    pub method: Method,
    /// Raw version segment; validated before any storage call.
    pub version: String,
    pub fields: ItemFields,
}

impl ItemRequest {
    pub fn new(method: Method, version: impl Into<String>, fields: ItemFields) -> Self {
        Self { method, version: version.into(), fields }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no such item")]
    NotFound,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("storage failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DispatchError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => DispatchError::NotFound,
            other => DispatchError::Backend(other.to_string()),
        }
    }
}

fn missing(field: &str) -> DispatchError {
    DispatchError::InvalidRequest(format!("missing required field '{field}'"))
}

impl ItemFields {
    fn user_for(&self, version: ApiVersion) -> Result<String, DispatchError> {
        match (version, self.user_id.as_deref()) {
            (_, Some(user)) if !user.is_empty() => Ok(user.to_string()),
            (ApiVersion::V1, _) => Ok(String::new()),
            (ApiVersion::V2, _) => Err(missing("userId")),
        }
    }

    fn required_id(&self) -> Result<Uuid, DispatchError> {
        self.id.ok_or_else(|| missing("id"))
    }

    fn required_title(&self) -> Result<String, DispatchError> {
        self.title.clone().ok_or_else(|| missing("title"))
    }

    fn required_priority(&self) -> Result<Priority, DispatchError> {
        self.priority.ok_or_else(|| missing("priority"))
    }
}

/// Routes validated requests to the active backend.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ItemStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn dispatch(&self, req: ItemRequest) -> Result<Item, DispatchError> {
        let version: ApiVersion = req.version.parse()?;
        let fields = req.fields;
        let user_id = fields.user_for(version)?;
        debug!(method = ?req.method, %version, %user_id, "dispatching item request");

        let result = match req.method {
            Method::Get => {
                let id = fields.required_id()?;
                self.store.get(&user_id, id).await
            }
            Method::Post => {
                // Any caller-supplied id is dropped; the backend mints one.
                let item = NewItem {
                    user_id,
                    title: fields.required_title()?,
                    priority: fields.required_priority()?,
                    complete: fields.complete.unwrap_or(false),
                };
                self.store.add(item).await
            }
            Method::Put => {
                let item = Item {
                    id: fields.required_id()?,
                    user_id,
                    title: fields.required_title()?,
                    priority: fields.required_priority()?,
                    complete: fields.complete.unwrap_or(false),
                };
                self.store.update(item).await
            }
        };

        result.map_err(|e| {
            if !e.is_not_found() {
                error!(method = ?req.method, code = e.code(), error = %e, "storage call failed");
            }
            DispatchError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(InMemoryStore::new()))
    }

    fn post_fields(user: Option<&str>) -> ItemFields {
        ItemFields {
            user_id: user.map(str::to_string),
            id: Some(Uuid::nil()),
            title: Some("buy milk".into()),
            priority: Some(Priority::Low),
            complete: Some(false),
        }
    }

    /// Counts calls so tests can assert nothing reached storage.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ItemStore for CountingStore {
        async fn add(&self, item: NewItem) -> Result<Item, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.add(item).await
        }
        async fn get(&self, user_id: &str, id: Uuid) -> Result<Item, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get(user_id, id).await
        }
        async fn update(&self, item: Item) -> Result<Item, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.update(item).await
        }
        async fn close(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn post_ignores_supplied_id_and_get_finds_item() -> anyhow::Result<()> {
        let d = dispatcher();
        let created = d.dispatch(ItemRequest::new(Method::Post, "v2", post_fields(Some("u1")))).await?;
        assert_ne!(created.id, Uuid::nil());
        assert_eq!(created.user_id, "u1");

        let get = ItemFields { user_id: Some("u1".into()), id: Some(created.id), ..Default::default() };
        let fetched = d.dispatch(ItemRequest::new(Method::Get, "v2", get)).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn put_replaces_mutable_fields() -> anyhow::Result<()> {
        let d = dispatcher();
        let created = d.dispatch(ItemRequest::new(Method::Post, "v1", post_fields(Some("u1")))).await?;
        let put = ItemFields {
            user_id: Some("u1".into()),
            id: Some(created.id),
            title: Some("buy oat milk".into()),
            priority: Some(Priority::High),
            complete: Some(true),
        };
        let updated = d.dispatch(ItemRequest::new(Method::Put, "v1", put)).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "buy oat milk");
        assert!(updated.complete);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_version_never_reaches_storage() {
        let store = Arc::new(CountingStore::default());
        let d = Dispatcher::new(store.clone());
        for version in ["v3", "", "V1"] {
            let err = d.dispatch(ItemRequest::new(Method::Post, version, post_fields(Some("u1")))).await.unwrap_err();
            assert!(matches!(err, DispatchError::InvalidRequest(_)));
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn v2_requires_user_but_v1_does_not() -> anyhow::Result<()> {
        let d = dispatcher();
        let err = d.dispatch(ItemRequest::new(Method::Post, "v2", post_fields(None))).await.unwrap_err();
        assert!(matches!(err, DispatchError::InvalidRequest(_)));

        let anon = d.dispatch(ItemRequest::new(Method::Post, "v1", post_fields(None))).await?;
        assert_eq!(anon.user_id, "");
        let get = ItemFields { id: Some(anon.id), ..Default::default() };
        assert_eq!(d.dispatch(ItemRequest::new(Method::Get, "v1", get)).await?, anon);
        Ok(())
    }

    #[tokio::test]
    async fn missing_item_is_distinguishable() {
        let d = dispatcher();
        let get = ItemFields { user_id: Some("u1".into()), id: Some(Uuid::new_v4()), ..Default::default() };
        assert!(matches!(d.dispatch(ItemRequest::new(Method::Get, "v2", get)).await, Err(DispatchError::NotFound)));

        let put = ItemFields { id: Some(Uuid::new_v4()), ..post_fields(Some("u1")) };
        assert!(matches!(d.dispatch(ItemRequest::new(Method::Put, "v2", put)).await, Err(DispatchError::NotFound)));
    }

    #[tokio::test]
    async fn put_and_get_require_id() {
        let d = dispatcher();
        let fields = ItemFields { id: None, ..post_fields(Some("u1")) };
        for method in [Method::Get, Method::Put] {
            let err = d.dispatch(ItemRequest::new(method, "v2", fields.clone())).await.unwrap_err();
            assert!(matches!(err, DispatchError::InvalidRequest(_)));
        }
    }

    #[test]
    fn fields_accept_both_user_id_spellings() {
        let a: ItemFields = serde_json::from_str(r#"{"userId":"u1"}"#).unwrap();
        let b: ItemFields = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert_eq!(a, b);
    }
}
