//! Order Service
//!
//! The purchase transaction. Only the stock gate, the title lookup and the
//! ledger append decide the outcome; everything after them is detached.

use std::sync::Arc;

use super::ledger::OrderLedger;
use super::mirror::{HttpLedgerMirror, LedgerMirror};
use super::stock::{CatalogGateway, RemoteCatalog, StockGate};
use super::types::{OrderRecord, PurchaseOutcome};
use crate::cache::{EdgeCache, EvictionPolicy};
use crate::catalog::client::CatalogClient;
use crate::config::OrderConfig;
use crate::error::{BookstoreError, Result};
use crate::frontend::notifier::{CacheInvalidator, HttpInvalidator};

/// One order node: its ledger, the catalog it buys from, and the peers it
/// tells about each purchase.
pub struct OrderNode {
    pub ledger: OrderLedger,
    stock: Arc<dyn StockGate>,
    catalog: Arc<dyn CatalogGateway>,
    mirror: Arc<dyn LedgerMirror>,
    invalidator: Arc<dyn CacheInvalidator>,
    titles: EdgeCache<String>,
}

impl OrderNode {
    pub fn new(
        ledger: OrderLedger,
        stock: Arc<dyn StockGate>,
        catalog: Arc<dyn CatalogGateway>,
        mirror: Arc<dyn LedgerMirror>,
        invalidator: Arc<dyn CacheInvalidator>,
        title_cache_capacity: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            ledger,
            stock,
            catalog,
            mirror,
            invalidator,
            titles: EdgeCache::new(title_cache_capacity, EvictionPolicy::Lru),
        })
    }

    pub async fn from_config(config: &OrderConfig) -> Result<Arc<Self>> {
        let http_client = reqwest::Client::new();
        let ledger = OrderLedger::open(&config.data).await?;

        let remote = Arc::new(RemoteCatalog::new(
            CatalogClient::new(http_client.clone(), config.timeout),
            config.catalog.clone(),
        ));
        let mirror = HttpLedgerMirror::new(http_client.clone(), config.peers.clone(), config.timeout);
        let invalidator = HttpInvalidator::new(http_client, config.frontends.clone(), config.timeout);

        tracing::info!(
            "Order node on {}: catalog {}, {} peer(s), {} frontend(s)",
            config.bind,
            config.catalog,
            config.peers.len(),
            config.frontends.len()
        );

        Ok(Self::new(
            ledger,
            remote.clone(),
            remote,
            Arc::new(mirror),
            Arc::new(invalidator),
            config.title_cache_capacity,
        ))
    }

    /// Checks stock, records the purchase, then fires the follow-up side
    /// effects (peer mirror, frontend invalidation, catalog decrement) on a
    /// detached task.
    ///
    /// The purchase succeeds once the ledger row is persisted; failed side
    /// effects are logged and leave ledger and inventory disagreeing.
    pub async fn record_purchase(&self, id: &str) -> Result<PurchaseOutcome> {
        if !self.stock.is_available(id).await? {
            tracing::info!("Refused purchase of {}: out of stock", id);
            return Err(BookstoreError::OutOfStock(id.to_string()));
        }

        let title = self.resolve_title(id).await?;

        let record = OrderRecord::now(id);
        self.ledger.append(record.clone()).await?;
        tracing::info!("Recorded purchase of {} ({}) at {}", id, title, record.timestamp);

        let mirror = self.mirror.clone();
        let invalidator = self.invalidator.clone();
        let catalog = self.catalog.clone();
        let mirrored = record.clone();
        tokio::spawn(async move {
            tokio::join!(
                mirror.mirror(&mirrored),
                invalidator.invalidate(&mirrored.item_number),
                decrement(catalog.as_ref(), &mirrored.item_number),
            );
        });

        Ok(PurchaseOutcome { record, title })
    }

    /// Appends a purchase accepted by a peer. Not mirrored any further.
    pub async fn accept_mirror(&self, item_number: &str, timestamp: String) -> Result<OrderRecord> {
        let record = OrderRecord {
            item_number: item_number.to_string(),
            timestamp,
        };
        self.ledger.append(record.clone()).await?;
        tracing::info!("Mirrored purchase of {} from peer", item_number);
        Ok(record)
    }

    async fn resolve_title(&self, id: &str) -> Result<String> {
        if let Some(title) = self.titles.lookup(id) {
            return Ok(title);
        }

        let info = self.catalog.info(id).await?;
        self.titles.insert(id, info.title.clone());
        Ok(info.title)
    }
}

/// Re-reads the quantity and writes back one less, floored at zero.
/// Races with every other purchaser of the same item.
async fn decrement(catalog: &dyn CatalogGateway, id: &str) {
    let current = match catalog.info(id).await {
        Ok(info) => info.quantity,
        Err(e) => {
            tracing::warn!("Error reading stock of {} for decrement: {}", id, e);
            return;
        }
    };

    let next = (i64::from(current) - 1).max(0);
    match catalog.set_quantity(id, next).await {
        Ok(()) => tracing::info!("Catalog updated: {} now {}", id, next),
        Err(e) => tracing::warn!("Error updating catalog for {}: {}", id, e),
    }
}
