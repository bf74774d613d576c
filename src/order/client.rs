use std::time::Duration;

use super::protocol::{ENDPOINT_PURCHASE, PurchaseResponse};
use crate::catalog::client::{decode, endpoint_url};
use crate::error::Result;

/// Forwards purchases to an order node, preserving its refusals.
#[derive(Clone)]
pub struct OrderClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl OrderClient {
    pub fn new(http_client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    pub async fn purchase(&self, base: &str, id: &str) -> Result<PurchaseResponse> {
        let response = self
            .http_client
            .post(endpoint_url(base, ENDPOINT_PURCHASE, &[id])?)
            .timeout(self.timeout)
            .send()
            .await?;
        decode(response, id).await
    }
}
