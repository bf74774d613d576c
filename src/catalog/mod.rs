//! Catalog Service Module
//!
//! The inventory of record. Each catalog node owns a full copy of the
//! table and keeps it loosely in step with its peers.
//!
//! ## Core Concepts
//! - **Store**: `InventoryStore` is the node's table, persisted in full on every write.
//! - **Fan-out**: client writes are pushed once to every other replica, tagged so they stop there.
//! - **Coherence**: every successful write tells the frontends to drop their cached copy.
//! - **Convergence**: best effort only. Replicas that miss a push stay diverged.

pub mod client;
pub mod handlers;
pub mod protocol;
pub mod replication;
pub mod service;
pub mod store;
pub mod types;
