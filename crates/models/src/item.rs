use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Priority of a to-do item. Serialized and stored as `Low`, `Medium` or `High`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            other => Err(ModelError::Validation(format!("invalid priority '{other}' (expected Low, Medium or High)"))),
        }
    }
}

/// A stored to-do item. `id` is minted by the backend on creation and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub priority: Priority,
    pub complete: bool,
}

/// Creation input: everything but the id, which only a backend may assign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub user_id: String,
    pub title: String,
    pub priority: Priority,
    #[serde(default)]
    pub complete: bool,
}

impl NewItem {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, priority: Priority, complete: bool) -> Self {
        Self { user_id: user_id.into(), title: title.into(), priority, complete }
    }

    /// Attach a backend-minted id.
    pub fn into_item(self, id: Uuid) -> Item {
        Item { id, user_id: self.user_id, title: self.title, priority: self.priority, complete: self.complete }
    }
}

impl From<Item> for NewItem {
    fn from(item: Item) -> Self {
        Self { user_id: item.user_id, title: item.title, priority: item.priority, complete: item.complete }
    }
}
