//! Storage abstractions for to-do items.
//!
//! [`ItemStore`] is the single contract every backend satisfies with identical observable
//! behavior; backends differ only in durability and cost:
//! - [`memory::InMemoryStore`]: mutex-guarded keyspace, nothing persisted.
//! - [`json_file::JsonFileStore`]: same keyspace, full JSON snapshot rewritten on every mutation.
//! - [`relational::SeaOrmStore`]: rows in the Postgres `items` table.

use std::sync::Arc;

use async_trait::async_trait;
use models::{Item, NewItem};
use tracing::info;
use uuid::Uuid;

use configs::{AppConfig, StorageMode};

use crate::errors::StoreError;

pub mod keyspace;
pub mod memory;
pub mod json_file;
pub mod relational;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use relational::SeaOrmStore;

/// Storage contract for to-do items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Mint a fresh id, store the item under `(user_id, id)` and return the stored record.
    async fn add(&self, item: NewItem) -> Result<Item, StoreError>;

    /// Fetch the item stored under `(user_id, id)`, or [`StoreError::NotFound`].
    async fn get(&self, user_id: &str, id: Uuid) -> Result<Item, StoreError>;

    /// Replace the mutable fields of an existing item. Never creates a record.
    async fn update(&self, item: Item) -> Result<Item, StoreError>;

    /// Release backend resources; durable backends flush their last-known state first.
    async fn close(&self) -> Result<(), StoreError>;
}

/// Build the backend selected by `storage.mode`.
///
/// Connectivity problems with the relational backend surface here, before the server starts.
pub async fn open(cfg: &AppConfig) -> Result<Arc<dyn ItemStore>, StoreError> {
    let mode = cfg
        .storage
        .mode
        .ok_or_else(|| StoreError::Unavailable("no storage mode configured".into()))?;
    let store: Arc<dyn ItemStore> = match mode {
        StorageMode::InMemory => Arc::new(InMemoryStore::new()),
        StorageMode::JsonFile => {
            let path = cfg
                .storage
                .json_path
                .clone()
                .ok_or_else(|| StoreError::Unavailable("json-store mode requires a json path".into()))?;
            Arc::new(JsonFileStore::open(path).await)
        }
        StorageMode::Postgres => Arc::new(SeaOrmStore::connect(&cfg.database).await?),
    };
    info!(?mode, "storage backend ready");
    Ok(store)
}
