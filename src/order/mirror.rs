//! Peer ledger mirroring. Each accepted purchase is pushed once to the other
//! order nodes; a peer that misses it stays behind for good.

use async_trait::async_trait;
use std::time::Duration;

use super::protocol::{ENDPOINT_NOTIFY_PURCHASE, MirrorPurchaseRequest};
use super::types::OrderRecord;
use crate::catalog::client::endpoint_url;

#[async_trait]
pub trait LedgerMirror: Send + Sync {
    async fn mirror(&self, record: &OrderRecord);
}

pub struct HttpLedgerMirror {
    http_client: reqwest::Client,
    peers: Vec<String>,
    timeout: Duration,
}

impl HttpLedgerMirror {
    pub fn new(http_client: reqwest::Client, peers: Vec<String>, timeout: Duration) -> Self {
        Self {
            http_client,
            peers,
            timeout,
        }
    }
}

#[async_trait]
impl LedgerMirror for HttpLedgerMirror {
    async fn mirror(&self, record: &OrderRecord) {
        let payload = MirrorPurchaseRequest {
            timestamp: record.timestamp.clone(),
        };

        for peer in &self.peers {
            let url = match endpoint_url(peer, ENDPOINT_NOTIFY_PURCHASE, &[&record.item_number]) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping mirror to {}: {}", peer, e);
                    continue;
                }
            };

            let response = self
                .http_client
                .post(url)
                .json(&payload)
                .timeout(self.timeout)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!("Mirrored order for {} to {}", record.item_number, peer);
                }
                Ok(resp) => tracing::warn!(
                    "Peer {} refused order for {}: {}",
                    peer,
                    record.item_number,
                    resp.status()
                ),
                Err(e) => tracing::warn!(
                    "Error mirroring order for {} to {}: {}",
                    record.item_number,
                    peer,
                    e
                ),
            }
        }
    }
}
