//! Replicated Bookstore Backend
//!
//! Three node roles, each normally deployed as a pair of peers:
//!
//! - **`catalog`**: the inventory of record. Replicas push client writes to each other
//!   once and tell frontends to drop stale cache entries.
//! - **`order`**: purchase transactions. A stock pre-check, a persisted ledger row,
//!   then best-effort mirroring, cache invalidation and catalog decrement.
//! - **`frontend`**: the public edge. Round-robin routing over the catalog and order
//!   pools, with a bounded read cache in front of the catalog.
//!
//! Supporting modules:
//! - **`cache`**: the bounded, recency-ordered cache used by frontends and order nodes.
//! - **`persist`**: whole-table flat-file storage.
//! - **`config`**: command line configuration for each role.
//! - **`error`**: the error taxonomy shared by every node.
//!
//! Consistency is best effort throughout. Nothing here retries, orders or
//! reconciles writes, so replicas can drift apart and stay that way.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod frontend;
pub mod order;
pub mod persist;
