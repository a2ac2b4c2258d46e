//! Collection persisted as one pretty-printed JSON array.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use catalog_core::{Item, ItemId, NewItem};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::traits::ItemStore;

/// Item store backed by a single JSON file.
///
/// Reads take no lock. Writes hold `write_lock` for the whole
/// read-modify-write and replace the file by renaming a sibling temp file,
/// so readers see either the old or the new collection.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> Result<Vec<Item>, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "collection file missing, using empty");
                return Ok(Vec::new());
            },
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        serde_json::from_slice(&raw)
            .map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })
    }

    async fn write_items(&self, items: &[Item]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| StorageError::io(parent, e))?;
        }
        let body = serde_json::to_vec_pretty(items)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await.map_err(|e| StorageError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| StorageError::io(&self.path, e))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Item>, StorageError> {
        self.read_items().await
    }

    async fn insert(&self, new: NewItem, now: DateTime<Utc>) -> Result<Item, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_items().await?;
        let id = next_item_id(&items, now.timestamp_millis());
        let item = Item::from_new(ItemId::Int(id), new);
        items.push(item.clone());
        self.write_items(&items).await?;
        tracing::info!(id = %item.id, total = items.len(), "item stored");
        Ok(item)
    }
}

/// Timestamp-derived id that never repeats an existing numeric id.
///
/// Two inserts in the same millisecond get consecutive ids.
#[must_use]
pub fn next_item_id(items: &[Item], now_ms: i64) -> i64 {
    let highest = items.iter().filter_map(|i| i.id.as_int()).max();
    match highest {
        Some(h) if h >= now_ms => h.saturating_add(1),
        _ => now_ms,
    }
}
