use std::collections::HashMap;

use models::{Item, NewItem};
use uuid::Uuid;

use crate::errors::StoreError;

/// Two-level map `user_id -> id -> item` shared by the in-process backends.
///
/// Not synchronized on its own; owners keep it behind their lock and never hand it out.
#[derive(Debug, Default)]
pub struct Keyspace {
    users: HashMap<String, HashMap<Uuid, Item>>,
}

impl Keyspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a flat list, keeping every item of every user.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut ks = Self::new();
        for item in items {
            ks.users.entry(item.user_id.clone()).or_default().insert(item.id, item);
        }
        ks
    }

    /// Mint an id that is unused in the item's partition and insert the item.
    pub fn insert_new(&mut self, item: NewItem) -> Item {
        let partition = self.users.entry(item.user_id.clone()).or_default();
        let mut id = Uuid::new_v4();
        while partition.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let stored = item.into_item(id);
        partition.insert(id, stored.clone());
        stored
    }

    pub fn get(&self, user_id: &str, id: Uuid) -> Result<Item, StoreError> {
        self.users
            .get(user_id)
            .and_then(|partition| partition.get(&id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Overwrite an existing `(user_id, id)` entry; missing entries are left absent.
    pub fn replace(&mut self, item: Item) -> Result<Item, StoreError> {
        let slot = self
            .users
            .get_mut(&item.user_id)
            .and_then(|partition| partition.get_mut(&item.id))
            .ok_or(StoreError::NotFound)?;
        *slot = item;
        Ok(slot.clone())
    }

    /// Flatten to an unordered list of items.
    pub fn items(&self) -> Vec<Item> {
        self.users.values().flat_map(|partition| partition.values().cloned()).collect()
    }

    pub fn len(&self) -> usize {
        self.users.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
