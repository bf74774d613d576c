//! Node Configuration
//!
//! Command line (and environment) surface for the three roles. Each role's
//! arguments convert into a plain config struct that node constructors
//! consume, so tests can build nodes without going through clap.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, EvictionPolicy};

#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(about = "Replicated bookstore backend: catalog, order and frontend nodes")]
pub struct Cli {
    #[command(subcommand)]
    pub role: Role,
}

#[derive(Subcommand, Debug)]
pub enum Role {
    /// Run a catalog replica
    Catalog(CatalogArgs),
    /// Run an order node
    Order(OrderArgs),
    /// Run a frontend (edge cache + load balancer)
    Frontend(FrontendArgs),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// HTTP bind address
    #[arg(long, env = "BOOKSTORE_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Inventory table
    #[arg(long, env = "BOOKSTORE_DATA", default_value = "catalog.json")]
    pub data: PathBuf,

    /// Other catalog replicas (base URL, repeatable)
    #[arg(long = "peer", env = "BOOKSTORE_PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Frontends to invalidate after writes (base URL, repeatable)
    #[arg(long = "frontend", env = "BOOKSTORE_FRONTENDS", value_delimiter = ',')]
    pub frontends: Vec<String>,

    /// Timeout for every outbound call, in milliseconds
    #[arg(long, env = "BOOKSTORE_TIMEOUT_MS", default_value_t = 1000)]
    pub timeout_ms: u64,
}

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// HTTP bind address
    #[arg(long, env = "BOOKSTORE_BIND", default_value = "0.0.0.0:5001")]
    pub bind: SocketAddr,

    /// Ledger file
    #[arg(long, env = "BOOKSTORE_DATA", default_value = "order.json")]
    pub data: PathBuf,

    /// Authoritative catalog (base URL)
    #[arg(long, env = "CATALOG_SERVER_URL", default_value = "http://localhost:5000")]
    pub catalog: String,

    /// Other order nodes that mirror this ledger (base URL, repeatable)
    #[arg(long = "peer", env = "BOOKSTORE_PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Frontends to invalidate after purchases (base URL, repeatable)
    #[arg(long = "frontend", env = "BOOKSTORE_FRONTENDS", value_delimiter = ',')]
    pub frontends: Vec<String>,

    /// Capacity of the item title cache
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub title_cache_capacity: usize,

    /// Timeout for every outbound call, in milliseconds
    #[arg(long, env = "BOOKSTORE_TIMEOUT_MS", default_value_t = 1000)]
    pub timeout_ms: u64,
}

#[derive(Args, Debug)]
pub struct FrontendArgs {
    /// HTTP bind address
    #[arg(long, env = "BOOKSTORE_BIND", default_value = "0.0.0.0:5002")]
    pub bind: SocketAddr,

    /// Catalog replicas to balance reads over (base URL, repeatable)
    #[arg(long = "catalog", env = "BOOKSTORE_CATALOGS", value_delimiter = ',', required = true)]
    pub catalogs: Vec<String>,

    /// Order nodes to balance purchases over (base URL, repeatable)
    #[arg(long = "order", env = "BOOKSTORE_ORDERS", value_delimiter = ',', required = true)]
    pub orders: Vec<String>,

    /// Maximum number of cached reads
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    /// What to drop when the cache is full: lru or clear-all
    #[arg(long, default_value_t = EvictionPolicy::Lru)]
    pub eviction: EvictionPolicy,

    /// Timeout for every outbound call, in milliseconds
    #[arg(long, env = "BOOKSTORE_TIMEOUT_MS", default_value_t = 1000)]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub bind: SocketAddr,
    pub data: PathBuf,
    pub peers: Vec<String>,
    pub frontends: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OrderConfig {
    pub bind: SocketAddr,
    pub data: PathBuf,
    pub catalog: String,
    pub peers: Vec<String>,
    pub frontends: Vec<String>,
    pub title_cache_capacity: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub bind: SocketAddr,
    pub catalogs: Vec<String>,
    pub orders: Vec<String>,
    pub cache_capacity: usize,
    pub eviction: EvictionPolicy,
    pub timeout: Duration,
}

impl From<CatalogArgs> for CatalogConfig {
    fn from(args: CatalogArgs) -> Self {
        Self {
            bind: args.bind,
            data: args.data,
            peers: normalize_urls(args.peers),
            frontends: normalize_urls(args.frontends),
            timeout: Duration::from_millis(args.timeout_ms),
        }
    }
}

impl From<OrderArgs> for OrderConfig {
    fn from(args: OrderArgs) -> Self {
        Self {
            bind: args.bind,
            data: args.data,
            catalog: normalize_url(&args.catalog),
            peers: normalize_urls(args.peers),
            frontends: normalize_urls(args.frontends),
            title_cache_capacity: args.title_cache_capacity,
            timeout: Duration::from_millis(args.timeout_ms),
        }
    }
}

impl From<FrontendArgs> for FrontendConfig {
    fn from(args: FrontendArgs) -> Self {
        Self {
            bind: args.bind,
            catalogs: normalize_urls(args.catalogs),
            orders: normalize_urls(args.orders),
            cache_capacity: args.cache_capacity,
            eviction: args.eviction,
            timeout: Duration::from_millis(args.timeout_ms),
        }
    }
}

/// Accepts `host:port` or a full URL; strips trailing slashes.
pub fn normalize_url(raw: &str) -> String {
    let cleaned = raw.trim().trim_end_matches('/');
    if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        cleaned.to_string()
    } else {
        format!("http://{}", cleaned)
    }
}

fn normalize_urls(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .filter(|url| !url.trim().is_empty())
        .map(|url| normalize_url(url))
        .collect()
}
