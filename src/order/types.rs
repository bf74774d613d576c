use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout of ledger rows: naive UTC with microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One completed purchase. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub item_number: String,
    pub timestamp: String,
}

impl OrderRecord {
    pub fn now(item_number: impl Into<String>) -> Self {
        Self {
            item_number: item_number.into(),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// What a successful purchase hands back to the caller.
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub record: OrderRecord,
    pub title: String,
}
