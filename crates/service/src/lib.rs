//! Storage layer for to-do items and the request dispatcher on top of it.
//! - `storage` holds the `ItemStore` contract and its three backends.
//! - `dispatch` turns a versioned method + field set into exactly one storage call.

pub mod errors;
pub mod storage;
pub mod dispatch;
#[cfg(test)]
pub mod test_support;

pub use dispatch::{ApiVersion, DispatchError, Dispatcher, ItemFields, ItemRequest, Method};
pub use errors::StoreError;
pub use storage::ItemStore;
