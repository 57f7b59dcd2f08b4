use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::{Item, NewItem};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::keyspace::Keyspace;
use super::ItemStore;
use crate::errors::StoreError;

/// JSON file-backed item store.
///
/// Keeps the keyspace in memory and rewrites the whole file, as a JSON array of items, after
/// every successful add or update. The lock is held across the mutation and the write so
/// snapshots land in the same order as the mutations that produced them.
///
/// A failed write is logged and does not undo the in-memory change.
pub struct JsonFileStore {
    inner: Mutex<Keyspace>,
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Load the snapshot at `path`. A missing or unreadable file yields an empty store.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Self {
        let file_path = path.into();
        if let Err(e) = common::env::ensure_parent_dir(&file_path).await {
            warn!(path = %file_path.display(), error = %e, "cannot prepare snapshot directory");
        }
        let items = load_snapshot(&file_path).await;
        debug!(path = %file_path.display(), count = items.len(), "snapshot loaded");
        Self { inner: Mutex::new(Keyspace::from_items(items)), file_path }
    }

    async fn save(&self, keyspace: &Keyspace) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&keyspace.items())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", self.file_path.display())))
    }

    /// Flush after a mutation. Failure only costs durability for this write.
    async fn save_logged(&self, keyspace: &Keyspace) {
        if let Err(e) = self.save(keyspace).await {
            error!(path = %self.file_path.display(), error = %e, "snapshot flush failed; in-memory state kept");
        }
    }
}

async fn load_snapshot(path: &Path) -> Vec<Item> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "snapshot not readable; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_slice::<Vec<Item>>(&bytes) {
        Ok(items) => items,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "snapshot malformed; starting empty");
            Vec::new()
        }
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn add(&self, item: NewItem) -> Result<Item, StoreError> {
        let mut keyspace = self.inner.lock().await;
        let stored = keyspace.insert_new(item);
        self.save_logged(&keyspace).await;
        debug!(user_id = %stored.user_id, item_id = %stored.id, "item added");
        Ok(stored)
    }

    async fn get(&self, user_id: &str, id: Uuid) -> Result<Item, StoreError> {
        self.inner.lock().await.get(user_id, id)
    }

    async fn update(&self, item: Item) -> Result<Item, StoreError> {
        let mut keyspace = self.inner.lock().await;
        let stored = keyspace.replace(item)?;
        self.save_logged(&keyspace).await;
        Ok(stored)
    }

    async fn close(&self) -> Result<(), StoreError> {
        let keyspace = self.inner.lock().await;
        self.save(&keyspace).await
    }
}
