use thiserror::Error;

/// Failures a storage backend can report through the [`ItemStore`](crate::storage::ItemStore) contract.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item exists for the requested `(user_id, id)` pair.
    #[error("to-do item not found")]
    NotFound,
    /// The backend could not be reached at construction time.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    /// The file snapshot could not be encoded or written.
    #[error("serialization failure: {0}")]
    Serialization(String),
    /// A round-trip to the backend failed after construction.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            StoreError::NotFound => 1003,
            StoreError::Unavailable(_) => 1201,
            StoreError::Serialization(_) => 1202,
            StoreError::Backend(_) => 1200,
        }
    }
}
