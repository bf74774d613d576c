use serde_json::Value;
use std::sync::Arc;

use super::router::{Pool, RequestRouter};
use crate::cache::EdgeCache;
use crate::catalog::client::CatalogClient;
use crate::config::FrontendConfig;
use crate::error::{BookstoreError, Result};
use crate::order::client::OrderClient;
use crate::order::protocol::PurchaseResponse;

/// The public edge: a read-through cache over the catalog pool and a
/// pass-through to the order pool.
///
/// Search results and item info share one cache, keyed by the raw topic or
/// id string.
pub struct FrontendNode {
    pub cache: EdgeCache<Value>,
    pub router: RequestRouter,
    catalog: CatalogClient,
    orders: OrderClient,
}

impl FrontendNode {
    pub fn new(
        cache: EdgeCache<Value>,
        router: RequestRouter,
        catalog: CatalogClient,
        orders: OrderClient,
    ) -> Arc<Self> {
        Arc::new(Self {
            cache,
            router,
            catalog,
            orders,
        })
    }

    pub fn from_config(config: &FrontendConfig) -> Arc<Self> {
        let http_client = reqwest::Client::new();

        tracing::info!(
            "Frontend node on {}: catalog pool {:?}, order pool {:?}, cache {} ({})",
            config.bind,
            config.catalogs,
            config.orders,
            config.cache_capacity,
            config.eviction
        );

        Self::new(
            EdgeCache::new(config.cache_capacity, config.eviction),
            RequestRouter::new(config.catalogs.clone(), config.orders.clone()),
            CatalogClient::new(http_client.clone(), config.timeout),
            OrderClient::new(http_client, config.timeout),
        )
    }

    pub async fn search(&self, topic: &str) -> Result<Value> {
        if let Some(cached) = self.cache.lookup(topic) {
            return Ok(cached);
        }

        let upstream = self.upstream(Pool::Catalog)?;
        let hits = self.catalog.search(upstream, topic).await?;
        let value = serde_json::to_value(hits)?;

        self.cache.insert(topic, value.clone());
        Ok(value)
    }

    pub async fn info(&self, id: &str) -> Result<Value> {
        if let Some(cached) = self.cache.lookup(id) {
            return Ok(cached);
        }

        let upstream = self.upstream(Pool::Catalog)?;
        let info = self.catalog.info(upstream, id).await?;
        let value = serde_json::to_value(info)?;

        self.cache.insert(id, value.clone());
        Ok(value)
    }

    /// Purchases are never cached.
    pub async fn purchase(&self, id: &str) -> Result<PurchaseResponse> {
        let upstream = self.upstream(Pool::Order)?;
        self.orders.purchase(upstream, id).await
    }

    pub fn invalidate(&self, key: &str) -> bool {
        self.cache.invalidate(key)
    }

    fn upstream(&self, pool: Pool) -> Result<&str> {
        self.router.next_upstream(pool).ok_or_else(|| {
            BookstoreError::UpstreamUnavailable(format!("no {:?} upstreams configured", pool))
        })
    }
}
