//! Frontend Network Protocol
//!
//! The public edge. Reads go through the edge cache, purchases are routed
//! straight to an order node, and `/invalidate_cache` is the push channel
//! writers use to keep the cache coherent.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

pub const ENDPOINT_SEARCH: &str = "/search";
pub const ENDPOINT_INFO: &str = "/info";
pub const ENDPOINT_PURCHASE: &str = "/purchase";
/// Drops one key from the edge cache. Unauthenticated.
pub const ENDPOINT_INVALIDATE: &str = "/invalidate_cache";
pub const ENDPOINT_CACHE_STATS: &str = "/cache/stats";

// --- Data Transfer Objects ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateResponse {
    pub key: String,
    pub invalidated: bool,
    pub message: String,
}
