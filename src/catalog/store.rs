//! Inventory Store
//!
//! The table a catalog replica serves, held in memory and mirrored to one
//! flat file.

use std::path::PathBuf;
use tokio::sync::RwLock;

use super::protocol::SearchHit;
use super::types::{InventoryItem, ItemDelta};
use crate::error::{BookstoreError, Result};
use crate::persist::FlatFile;

/// The authoritative inventory table of one catalog node.
///
/// Rows keep the order they were loaded in; search results follow that
/// order. Every mutation rewrites the persisted table before returning.
pub struct InventoryStore {
    items: RwLock<Vec<InventoryItem>>,
    file: FlatFile<InventoryItem>,
}

impl InventoryStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = FlatFile::new(path);
        let items = file.load().await?;
        tracing::info!(
            "Loaded {} items from {}",
            items.len(),
            file.path().display()
        );

        Ok(Self {
            items: RwLock::new(items),
            file,
        })
    }

    pub async fn get(&self, id: &str) -> Result<InventoryItem> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| BookstoreError::NotFound(id.to_string()))
    }

    /// Case-insensitive substring match on `topic`, in table order.
    pub async fn search(&self, topic: &str) -> Vec<SearchHit> {
        let needle = topic.to_lowercase();
        self.items
            .read()
            .await
            .iter()
            .filter(|item| item.topic.to_lowercase().contains(&needle))
            .map(|item| SearchHit {
                id: item.id.clone(),
                title: item.title.clone(),
            })
            .collect()
    }

    pub async fn all(&self) -> Vec<InventoryItem> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// `quantity > 0` for `id`.
    pub async fn is_available(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.quantity > 0)
    }

    /// Writes the supplied fields and persists the whole table.
    ///
    /// Not a compare-and-set: two callers computing a new quantity from the
    /// same earlier read both win, last write standing.
    pub async fn apply_update(&self, id: &str, delta: &ItemDelta) -> Result<InventoryItem> {
        delta.validate()?;

        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| BookstoreError::NotFound(id.to_string()))?;

        if delta.is_empty() {
            tracing::debug!("Empty update for item {}, nothing to write", id);
            return Ok(item.clone());
        }

        delta.apply_to(item);
        let updated = item.clone();

        self.file.save(&items).await?;
        tracing::info!(
            "Updated item {}: quantity={} price={}",
            id,
            updated.quantity,
            updated.price
        );

        Ok(updated)
    }

    /// Replaces the in-memory table with whatever is on disk.
    pub async fn reload(&self) -> Result<usize> {
        let loaded = self.file.load().await?;
        let count = loaded.len();
        *self.items.write().await = loaded;
        tracing::info!("Reloaded {} items from {}", count, self.file.path().display());
        Ok(count)
    }
}
