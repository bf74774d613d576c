//! Order Network Protocol

use serde::{Deserialize, Serialize};

use super::types::OrderRecord;

// --- API Endpoints ---

/// Client purchase of one item.
pub const ENDPOINT_PURCHASE: &str = "/purchase";
/// Peer-side mirroring of a purchase accepted elsewhere.
pub const ENDPOINT_NOTIFY_PURCHASE: &str = "/notify_purchase";
/// Local ledger dump.
pub const ENDPOINT_ORDERS: &str = "/orders";

// --- Data Transfer Objects ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub message: String,
    pub order: OrderRecord,
}

/// Body of `/notify_purchase/{id}`. The item number travels in the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorPurchaseRequest {
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorPurchaseResponse {
    pub message: String,
}
