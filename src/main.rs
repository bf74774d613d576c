use axum::Router;
use bookstore_cluster::catalog::{self, service::CatalogNode};
use bookstore_cluster::config::{CatalogConfig, Cli, FrontendConfig, OrderConfig, Role};
use bookstore_cluster::frontend::{self, service::FrontendNode};
use bookstore_cluster::order::{self, service::OrderNode};
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let (bind_addr, app): (SocketAddr, Router) = match cli.role {
        Role::Catalog(args) => {
            let config = CatalogConfig::from(args);
            let node = CatalogNode::from_config(&config).await?;
            (config.bind, catalog::handlers::router(node))
        }
        Role::Order(args) => {
            let config = OrderConfig::from(args);
            let node = OrderNode::from_config(&config).await?;
            (config.bind, order::handlers::router(node))
        }
        Role::Frontend(args) => {
            let config = FrontendConfig::from(args);
            let node = FrontendNode::from_config(&config);
            (config.bind, frontend::handlers::router(node))
        }
    };

    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
