use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use models::{Item, NewItem};
use tracing::debug;
use uuid::Uuid;

use super::keyspace::Keyspace;
use super::ItemStore;
use crate::errors::StoreError;

/// Transient backend: the keyspace lives only as long as the process.
#[derive(Default)]
pub struct InMemoryStore {
    items: Mutex<Keyspace>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Keyspace> {
        // Keyspace operations never leave a half-written entry, so a poisoned lock is still usable.
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn add(&self, item: NewItem) -> Result<Item, StoreError> {
        let stored = self.lock().insert_new(item);
        debug!(user_id = %stored.user_id, item_id = %stored.id, "item added");
        Ok(stored)
    }

    async fn get(&self, user_id: &str, id: Uuid) -> Result<Item, StoreError> {
        self.lock().get(user_id, id)
    }

    async fn update(&self, item: Item) -> Result<Item, StoreError> {
        self.lock().replace(item)
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
