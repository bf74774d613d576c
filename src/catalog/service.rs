//! Catalog node service: one replica's table and the channels a write
//! triggers once it is committed locally.

use std::sync::Arc;

use super::client::CatalogClient;
use super::replication::{HttpFanout, ReplicationFanout};
use super::store::InventoryStore;
use super::types::{InventoryItem, ItemDelta};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::frontend::notifier::{CacheInvalidator, HttpInvalidator};

/// Whether a write came from a client or from another replica's fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOrigin {
    Client,
    Replica { is_notification: bool },
}

impl WriteOrigin {
    fn fans_out(self) -> bool {
        match self {
            WriteOrigin::Client => true,
            WriteOrigin::Replica { is_notification } => !is_notification,
        }
    }
}

/// One catalog replica: its table plus the two outbound channels a write
/// triggers.
pub struct CatalogNode {
    pub store: InventoryStore,
    fanout: Arc<dyn ReplicationFanout>,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl CatalogNode {
    pub fn new(
        store: InventoryStore,
        fanout: Arc<dyn ReplicationFanout>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            fanout,
            invalidator,
        })
    }

    pub async fn from_config(config: &CatalogConfig) -> Result<Arc<Self>> {
        let http_client = reqwest::Client::new();
        let store = InventoryStore::open(&config.data).await?;
        let items = store.len().await;

        let fanout = HttpFanout::new(
            CatalogClient::new(http_client.clone(), config.timeout),
            config.peers.clone(),
            config.bind.to_string(),
        );
        let invalidator = HttpInvalidator::new(http_client, config.frontends.clone(), config.timeout);

        tracing::info!(
            "Catalog node on {}: {} item(s), {} peer(s), {} frontend(s)",
            config.bind,
            items,
            config.peers.len(),
            config.frontends.len()
        );

        Ok(Self::new(store, Arc::new(fanout), Arc::new(invalidator)))
    }

    /// Applies `delta` locally, then notifies frontends and, for writes that
    /// have not been fanned out yet, the other replicas.
    ///
    /// Only the local write can fail the call. Notifications run on their
    /// own tasks after it commits; the caller never waits on a peer.
    pub async fn update(
        &self,
        id: &str,
        delta: &ItemDelta,
        origin: WriteOrigin,
    ) -> Result<InventoryItem> {
        let item = self.store.apply_update(id, delta).await?;

        let invalidator = self.invalidator.clone();
        let key = id.to_string();
        tokio::spawn(async move { invalidator.invalidate(&key).await });

        if origin.fans_out() {
            let fanout = self.fanout.clone();
            let key = id.to_string();
            let delta = delta.clone();
            tokio::spawn(async move { fanout.propagate(&key, &delta).await });
        }

        Ok(item)
    }
}
