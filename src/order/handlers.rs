use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::protocol::*;
use super::service::OrderNode;
use super::types::OrderRecord;
use crate::error::{BookstoreError, Result};

pub fn router(node: Arc<OrderNode>) -> Router {
    Router::new()
        .route(&format!("{}/:id", ENDPOINT_PURCHASE), post(handle_purchase))
        .route(
            &format!("{}/:id", ENDPOINT_NOTIFY_PURCHASE),
            post(handle_notify_purchase),
        )
        .route(ENDPOINT_ORDERS, get(handle_orders))
        .layer(Extension(node))
        .layer(TraceLayer::new_for_http())
}

pub async fn handle_purchase(
    Extension(node): Extension<Arc<OrderNode>>,
    Path(id): Path<String>,
) -> Result<Json<PurchaseResponse>> {
    let outcome = node.record_purchase(&id).await?;

    Ok(Json(PurchaseResponse {
        message: format!("Book {} purchased successfully", outcome.title),
        order: outcome.record,
    }))
}

pub async fn handle_notify_purchase(
    Extension(node): Extension<Arc<OrderNode>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<MirrorPurchaseRequest>, JsonRejection>,
) -> Result<Json<MirrorPurchaseResponse>> {
    let Json(req) = payload.map_err(|e| BookstoreError::InvalidRequest(e.body_text()))?;

    node.accept_mirror(&id, req.timestamp).await?;

    Ok(Json(MirrorPurchaseResponse {
        message: format!("Purchase notification received for item {}", id),
    }))
}

pub async fn handle_orders(Extension(node): Extension<Arc<OrderNode>>) -> Json<Vec<OrderRecord>> {
    Json(node.ledger.records().await)
}
