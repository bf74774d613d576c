use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::protocol::*;
use super::service::FrontendNode;
use crate::cache::CacheStats;
use crate::error::Result;
use crate::order::protocol::PurchaseResponse;

pub fn router(node: Arc<FrontendNode>) -> Router {
    Router::new()
        .route(&format!("{}/:topic", ENDPOINT_SEARCH), get(handle_search))
        .route(&format!("{}/:id", ENDPOINT_INFO), get(handle_info))
        .route(&format!("{}/:id", ENDPOINT_PURCHASE), post(handle_purchase))
        .route(
            &format!("{}/:id", ENDPOINT_INVALIDATE),
            post(handle_invalidate),
        )
        .route(ENDPOINT_CACHE_STATS, get(handle_cache_stats))
        .layer(Extension(node))
        .layer(TraceLayer::new_for_http())
}

pub async fn handle_search(
    Extension(node): Extension<Arc<FrontendNode>>,
    Path(topic): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(node.search(&topic).await?))
}

pub async fn handle_info(
    Extension(node): Extension<Arc<FrontendNode>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(node.info(&id).await?))
}

pub async fn handle_purchase(
    Extension(node): Extension<Arc<FrontendNode>>,
    Path(id): Path<String>,
) -> Result<Json<PurchaseResponse>> {
    let response = node.purchase(&id).await?;
    tracing::info!("{}", response.message);
    Ok(Json(response))
}

pub async fn handle_invalidate(
    Extension(node): Extension<Arc<FrontendNode>>,
    Path(key): Path<String>,
) -> (StatusCode, Json<InvalidateResponse>) {
    if node.invalidate(&key) {
        tracing::info!("Cache invalidated for item {}", key);
        (
            StatusCode::OK,
            Json(InvalidateResponse {
                message: format!("Cache invalidated for item {}", key),
                key,
                invalidated: true,
            }),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(InvalidateResponse {
                message: format!("Item {} not found in cache", key),
                key,
                invalidated: false,
            }),
        )
    }
}

pub async fn handle_cache_stats(Extension(node): Extension<Arc<FrontendNode>>) -> Json<CacheStats> {
    Json(node.cache.stats())
}
