//! Product endpoints: cached lookup, creation, inventory increase.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::ProductId;
use domain::{CreateProduct, Store};
use query::ProductView;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    pub price: i32,
    pub discount: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncreaseInventoryRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedResponse {
    pub id: ProductId,
}

// -- Handlers --

/// GET /api/v1/product/{id} — cached lookup with the discount applied.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i32>,
) -> Result<Json<ProductView>, ApiError> {
    let view = state.products.get(ProductId::new(id)).await?;
    Ok(Json(view))
}

/// POST /api/v1/product — create a product with zero starting stock.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<ProductCreatedResponse>, ApiError> {
    let id = state
        .catalog
        .create_product(CreateProduct {
            title: req.title,
            price: req.price,
            discount: req.discount,
        })
        .await?;

    Ok(Json(ProductCreatedResponse { id }))
}

/// PUT /api/v1/product — add units to a product's stock.
#[tracing::instrument(skip(state, req), fields(product_id = %req.product_id))]
pub async fn increase_inventory<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<IncreaseInventoryRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .increase_inventory(req.product_id, req.quantity)
        .await?;

    // Readers must not see the pre-update count for the rest of the TTL.
    state.products.invalidate(req.product_id).await;

    Ok(StatusCode::NO_CONTENT)
}
