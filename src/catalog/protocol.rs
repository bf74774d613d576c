//! Catalog Network Protocol
//!
//! Endpoints and DTOs served by catalog nodes. Frontends and order nodes
//! talk to the catalog exclusively through these shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::ItemDelta;

// --- API Endpoints ---

/// Topic search. Path parameter is the topic substring.
pub const ENDPOINT_SEARCH: &str = "/search";
/// Single item lookup.
pub const ENDPOINT_INFO: &str = "/info";
/// Client-originated write. Fans out to the other replicas.
pub const ENDPOINT_UPDATE: &str = "/update";
/// Replica-originated write. Applied locally, fan-out gated by `is_notification`.
pub const ENDPOINT_UPDATE_REPLICA: &str = "/update_replica";
/// Whole inventory dump.
pub const ENDPOINT_CATALOG: &str = "/catalog";
/// Stock pre-check used by order nodes.
pub const ENDPOINT_VERIFY: &str = "/verify";
/// Forces a reload of the persisted table.
pub const ENDPOINT_NOTIFY: &str = "/notify";

pub const MSG_IN_STOCK: &str = "Book is in stock";
pub const MSG_OUT_OF_STOCK: &str = "Book out of stock";
pub const MSG_UPDATED: &str = "Book updated successfully";

// --- Data Transfer Objects ---

/// One hit of a topic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
}

/// Response of `/info/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub title: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Payload of `/update_replica/{id}`.
///
/// `is_notification` marks a write that was already fanned out by its
/// origin; receivers apply it without pushing it any further.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplicaUpdateRequest {
    #[serde(flatten)]
    pub delta: ItemDelta,
    #[serde(default)]
    pub is_notification: bool,
    /// The replica the write came from, for logging only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub in_stock: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Optional body of `/notify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub message: Option<String>,
    pub item_number: Option<String>,
    pub sender: Option<String>,
}
