//! Cache Invalidation Channel
//!
//! Writers (catalog nodes after an update, order nodes after a purchase)
//! push invalidations to every frontend. Frontends never poll. Delivery is
//! best-effort: a frontend that misses the call keeps serving its stale
//! entry until it is evicted.

use async_trait::async_trait;
use std::time::Duration;

use super::protocol::ENDPOINT_INVALIDATE;
use crate::catalog::client::endpoint_url;

#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, key: &str);
}

pub struct HttpInvalidator {
    http_client: reqwest::Client,
    frontends: Vec<String>,
    timeout: Duration,
}

impl HttpInvalidator {
    pub fn new(http_client: reqwest::Client, frontends: Vec<String>, timeout: Duration) -> Self {
        Self {
            http_client,
            frontends,
            timeout,
        }
    }
}

#[async_trait]
impl CacheInvalidator for HttpInvalidator {
    async fn invalidate(&self, key: &str) {
        for frontend in &self.frontends {
            let url = match endpoint_url(frontend, ENDPOINT_INVALIDATE, &[key]) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping invalidation on {}: {}", frontend, e);
                    continue;
                }
            };

            let response = self
                .http_client
                .post(url)
                .timeout(self.timeout)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!("Cache invalidated in {} for item {}", frontend, key);
                }
                Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => {
                    tracing::debug!("Frontend {} had no cache entry for {}", frontend, key);
                }
                Ok(resp) => {
                    tracing::warn!(
                        "Error invalidating cache in {} for item {}: {}",
                        frontend,
                        key,
                        resp.status()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Error invalidating cache in {} for item {}: {}",
                        frontend,
                        key,
                        e
                    );
                }
            }
        }
    }
}
