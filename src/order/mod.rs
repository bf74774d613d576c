//! Order Service Module
//!
//! Turns a purchase request into a ledger row and a catalog decrement,
//! without a transaction spanning the two.
//!
//! ## Purchase Flow
//! 1. **Gate**: ask the authoritative catalog whether the item is in stock.
//! 2. **Title**: resolve the item's title through a small local cache.
//! 3. **Record**: append to the ledger and persist it. From here on the purchase stands.
//! 4. **Follow-up**: mirror to peer order nodes, invalidate the frontend cache and
//!    decrement the catalog. Each may fail on its own without undoing step 3.

pub mod client;
pub mod handlers;
pub mod ledger;
pub mod mirror;
pub mod protocol;
pub mod service;
pub mod stock;
pub mod types;
