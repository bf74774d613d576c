//! Frontend Service Module
//!
//! The public edge of the cluster.
//!
//! - **`router`**: round-robin choice of catalog and order upstreams.
//! - **`service`**: read-through edge cache for search/info, pass-through for purchases.
//! - **`notifier`**: the push channel writers use to invalidate frontend cache entries.
//! - **`handlers`**: HTTP request handlers for the Axum web server.

pub mod handlers;
pub mod notifier;
pub mod protocol;
pub mod router;
pub mod service;
