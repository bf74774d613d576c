//! Replica Fan-out
//!
//! Pushes a client-originated write to the other catalog replicas. One hop
//! only: the pushed request is flagged `is_notification` and the receiver
//! does not push it again.
//!
//! There is no ordering, versioning or retry. A peer that is down simply
//! misses the write, and two concurrent writes to the same item on
//! different replicas can leave them permanently apart.

use async_trait::async_trait;

use super::client::CatalogClient;
use super::protocol::ReplicaUpdateRequest;
use super::types::ItemDelta;

#[async_trait]
pub trait ReplicationFanout: Send + Sync {
    /// Best-effort: failures are logged, never returned.
    async fn propagate(&self, id: &str, delta: &ItemDelta);
}

pub struct HttpFanout {
    client: CatalogClient,
    peers: Vec<String>,
    origin: String,
}

impl HttpFanout {
    pub fn new(client: CatalogClient, peers: Vec<String>, origin: String) -> Self {
        Self {
            client,
            peers,
            origin,
        }
    }
}

#[async_trait]
impl ReplicationFanout for HttpFanout {
    async fn propagate(&self, id: &str, delta: &ItemDelta) {
        let request = ReplicaUpdateRequest {
            delta: delta.clone(),
            is_notification: true,
            origin: Some(self.origin.clone()),
        };

        for peer in &self.peers {
            match self.client.update_replica(peer, id, &request).await {
                Ok(()) => tracing::debug!("Propagated update of {} to {}", id, peer),
                Err(e) => tracing::warn!("Error notifying replica {} about {}: {}", peer, id, e),
            }
        }
    }
}
