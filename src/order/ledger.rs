//! Order ledger: the purchases this node has accepted or mirrored.

use std::path::PathBuf;
use tokio::sync::Mutex;

use super::types::OrderRecord;
use crate::error::Result;
use crate::persist::FlatFile;

/// Append-only purchase record of one order node.
///
/// Append and persist happen under a single lock, so concurrent purchases
/// never lose each other's rows. Each append rewrites the whole file.
pub struct OrderLedger {
    records: Mutex<Vec<OrderRecord>>,
    file: FlatFile<OrderRecord>,
}

impl OrderLedger {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = FlatFile::new(path);
        let records = file.load().await?;
        tracing::info!(
            "Loaded {} orders from {}",
            records.len(),
            file.path().display()
        );

        Ok(Self {
            records: Mutex::new(records),
            file,
        })
    }

    /// Appends `record` and persists the ledger. On a failed write the
    /// in-memory ledger is rolled back so it keeps matching the file.
    pub async fn append(&self, record: OrderRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        records.push(record);

        if let Err(e) = self.file.save(&records).await {
            records.pop();
            return Err(e);
        }

        Ok(())
    }

    pub async fn records(&self) -> Vec<OrderRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}
