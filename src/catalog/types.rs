//! Catalog Data Types
//!
//! The inventory record and the field-level delta that mutates it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BookstoreError, Result};

/// One row of the inventory table.
///
/// `id` is the stable 1-based position key the table was seeded with.
/// `topic` is what `/search` matches against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: Decimal,
    pub topic: String,
}

/// Field-level change carried by `/update` and `/update_replica`.
///
/// Absent fields are left untouched. `quantity` is signed on the wire so
/// an over-eager decrement arrives intact and is clamped here, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl ItemDelta {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            price: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(price) = self.price
            && price.is_sign_negative()
            && !price.is_zero()
        {
            return Err(BookstoreError::InvalidRequest(format!(
                "price must be non-negative, got {}",
                price
            )));
        }
        Ok(())
    }

    /// Writes the supplied fields into `item`. Quantity floors at zero.
    pub fn apply_to(&self, item: &mut InventoryItem) {
        if let Some(quantity) = self.quantity {
            item.quantity = clamp_quantity(quantity);
        }
        if let Some(price) = self.price {
            item.price = price;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }
}

pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}
