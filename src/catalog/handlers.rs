use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::protocol::*;
use super::service::{CatalogNode, WriteOrigin};
use super::types::{InventoryItem, ItemDelta};
use crate::error::{BookstoreError, Result};

pub fn router(node: Arc<CatalogNode>) -> Router {
    Router::new()
        .route(&format!("{}/:topic", ENDPOINT_SEARCH), get(handle_search))
        .route(&format!("{}/:id", ENDPOINT_INFO), get(handle_info))
        .route(&format!("{}/:id", ENDPOINT_UPDATE), put(handle_update))
        .route(
            &format!("{}/:id", ENDPOINT_UPDATE_REPLICA),
            put(handle_update_replica),
        )
        .route(ENDPOINT_CATALOG, get(handle_catalog))
        .route(&format!("{}/:id", ENDPOINT_VERIFY), post(handle_verify))
        .route(ENDPOINT_NOTIFY, post(handle_notify))
        .layer(Extension(node))
        .layer(TraceLayer::new_for_http())
}

pub async fn handle_search(
    Extension(node): Extension<Arc<CatalogNode>>,
    Path(topic): Path<String>,
) -> Json<Vec<SearchHit>> {
    let hits = node.store.search(&topic).await;
    tracing::info!("Catalog search for '{}': {} hit(s)", topic, hits.len());
    Json(hits)
}

pub async fn handle_info(
    Extension(node): Extension<Arc<CatalogNode>>,
    Path(id): Path<String>,
) -> Result<Json<ItemInfo>> {
    let item = node.store.get(&id).await?;
    Ok(Json(ItemInfo {
        title: item.title,
        quantity: item.quantity,
        price: item.price,
    }))
}

pub async fn handle_update(
    Extension(node): Extension<Arc<CatalogNode>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ItemDelta>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(delta) = payload.map_err(|e| BookstoreError::InvalidRequest(e.body_text()))?;

    node.update(&id, &delta, WriteOrigin::Client).await?;

    Ok(Json(MessageResponse {
        message: MSG_UPDATED.to_string(),
    }))
}

pub async fn handle_update_replica(
    Extension(node): Extension<Arc<CatalogNode>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ReplicaUpdateRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload.map_err(|e| BookstoreError::InvalidRequest(e.body_text()))?;

    tracing::info!(
        "Replica update for {} from {}",
        id,
        req.origin.as_deref().unwrap_or("unknown")
    );

    node.update(
        &id,
        &req.delta,
        WriteOrigin::Replica {
            is_notification: req.is_notification,
        },
    )
    .await?;

    Ok(Json(MessageResponse {
        message: MSG_UPDATED.to_string(),
    }))
}

pub async fn handle_catalog(
    Extension(node): Extension<Arc<CatalogNode>>,
) -> Json<Vec<InventoryItem>> {
    Json(node.store.all().await)
}

pub async fn handle_verify(
    Extension(node): Extension<Arc<CatalogNode>>,
    Path(id): Path<String>,
) -> Result<Json<VerifyResponse>> {
    let in_stock = node.store.is_available(&id).await?;
    let message = if in_stock {
        MSG_IN_STOCK
    } else {
        MSG_OUT_OF_STOCK
    };

    Ok(Json(VerifyResponse {
        in_stock,
        message: message.to_string(),
    }))
}

pub async fn handle_notify(
    Extension(node): Extension<Arc<CatalogNode>>,
    payload: Option<Json<NotifyRequest>>,
) -> Result<Json<MessageResponse>> {
    if let Some(Json(req)) = payload {
        tracing::info!(
            "Received {} notification for item {} from {}",
            req.message.as_deref().unwrap_or("reload"),
            req.item_number.as_deref().unwrap_or("-"),
            req.sender.as_deref().unwrap_or("unknown")
        );
    }

    let count = node.store.reload().await?;

    Ok(Json(MessageResponse {
        message: format!("Catalog updated successfully ({} items)", count),
    }))
}
