//! Catalog Client
//!
//! Typed HTTP access to a catalog node's public surface. Callers pick the
//! node (`base` is e.g. `http://127.0.0.1:5000`); every request carries the
//! configured timeout.

use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::protocol::*;
use super::types::ItemDelta;
use crate::error::{BookstoreError, ErrorResponse, Result};

#[derive(Clone)]
pub struct CatalogClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl CatalogClient {
    pub fn new(http_client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    pub async fn search(&self, base: &str, topic: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .http_client
            .get(endpoint_url(base, ENDPOINT_SEARCH, &[topic])?)
            .timeout(self.timeout)
            .send()
            .await?;
        decode(response, topic).await
    }

    pub async fn info(&self, base: &str, id: &str) -> Result<ItemInfo> {
        let response = self
            .http_client
            .get(endpoint_url(base, ENDPOINT_INFO, &[id])?)
            .timeout(self.timeout)
            .send()
            .await?;
        decode(response, id).await
    }

    /// Unknown ids count as not available.
    pub async fn verify(&self, base: &str, id: &str) -> Result<bool> {
        let response = self
            .http_client
            .post(endpoint_url(base, ENDPOINT_VERIFY, &[id])?)
            .timeout(self.timeout)
            .send()
            .await?;

        match decode::<VerifyResponse>(response, id).await {
            Ok(verdict) => Ok(verdict.in_stock),
            Err(BookstoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn update(&self, base: &str, id: &str, delta: &ItemDelta) -> Result<()> {
        let response = self
            .http_client
            .put(endpoint_url(base, ENDPOINT_UPDATE, &[id])?)
            .json(delta)
            .timeout(self.timeout)
            .send()
            .await?;
        decode::<MessageResponse>(response, id).await.map(|_| ())
    }

    pub async fn update_replica(
        &self,
        base: &str,
        id: &str,
        request: &ReplicaUpdateRequest,
    ) -> Result<()> {
        let response = self
            .http_client
            .put(endpoint_url(base, ENDPOINT_UPDATE_REPLICA, &[id])?)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;
        decode::<MessageResponse>(response, id).await.map(|_| ())
    }
}

/// `base` + `endpoint` + one percent-encoded path segment per entry of
/// `segments`, so ids and topics containing `/`, `?` or `#` reach the peer
/// intact.
pub(crate) fn endpoint_url(base: &str, endpoint: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| {
        BookstoreError::UpstreamUnavailable(format!("invalid upstream url {}: {}", base, e))
    })?;

    {
        let mut path = url.path_segments_mut().map_err(|_| {
            BookstoreError::UpstreamUnavailable(format!("upstream url {} cannot take a path", base))
        })?;
        path.pop_if_empty();
        path.extend(endpoint.split('/').filter(|part| !part.is_empty()));
        path.extend(segments);
    }

    Ok(url)
}

/// Parses a success body, or turns an error status back into a
/// `BookstoreError` naming `subject`.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    subject: &str,
) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.json::<ErrorResponse>().await.ok();
    Err(BookstoreError::from_peer(status, subject, body))
}
