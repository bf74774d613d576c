//! Stock Gate
//!
//! The purchase path's view of the authoritative catalog: a pre-check and
//! a later decrement, two separate calls with nothing reserved in between.
//! A `true` from `is_available` is stale the moment it returns.

use async_trait::async_trait;

use crate::catalog::client::CatalogClient;
use crate::catalog::protocol::ItemInfo;
use crate::catalog::types::ItemDelta;
use crate::error::Result;

#[async_trait]
pub trait StockGate: Send + Sync {
    /// `quantity > 0` on the authoritative catalog. Unknown ids are `false`.
    async fn is_available(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn info(&self, id: &str) -> Result<ItemInfo>;

    /// Writes an absolute quantity computed by the caller.
    async fn set_quantity(&self, id: &str, quantity: i64) -> Result<()>;
}

/// Both halves of the contract, backed by one catalog node.
pub struct RemoteCatalog {
    client: CatalogClient,
    base: String,
}

impl RemoteCatalog {
    pub fn new(client: CatalogClient, base: String) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl StockGate for RemoteCatalog {
    async fn is_available(&self, id: &str) -> Result<bool> {
        self.client.verify(&self.base, id).await
    }
}

#[async_trait]
impl CatalogGateway for RemoteCatalog {
    async fn info(&self, id: &str) -> Result<ItemInfo> {
        self.client.info(&self.base, id).await
    }

    async fn set_quantity(&self, id: &str, quantity: i64) -> Result<()> {
        self.client
            .update(&self.base, id, &ItemDelta::quantity(quantity))
            .await
    }
}
