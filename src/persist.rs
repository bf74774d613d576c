//! Flat-File Persistence
//!
//! Whole-table storage for the inventory and the ledger. Each save rewrites
//! every record; there is no write-ahead log, so a crash mid-write can leave
//! a truncated file behind.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub struct FlatFile<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> FlatFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record. A missing file is an empty table.
    pub async fn load(&self) -> Result<Vec<T>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("{} does not exist, starting empty", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, bytes).await?;
        tracing::debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
