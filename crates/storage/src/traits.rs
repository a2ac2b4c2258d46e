//! Storage trait abstraction.

use async_trait::async_trait;
use catalog_core::{Item, NewItem};
use chrono::{DateTime, Utc};

use crate::error::StorageError;

/// Persistent item collection.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Loads the whole collection in file order.
    async fn load_all(&self) -> Result<Vec<Item>, StorageError>;

    /// Appends a new item and persists the collection before returning.
    ///
    /// The store assigns the id from `now`; concurrent inserts are
    /// serialized so none of them is lost.
    async fn insert(&self, new: NewItem, now: DateTime<Utc>) -> Result<Item, StorageError>;
}
