//! Purchase endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{OrderId, ProductId, UserId};
use domain::Store;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyProductRequest {
    pub product_id: ProductId,
    pub user_id: UserId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedResponse {
    pub order_id: OrderId,
}

/// POST /api/v1/order — buy one unit of a product for a user.
#[tracing::instrument(skip(state, req), fields(product_id = %req.product_id, user_id = %req.user_id))]
pub async fn buy<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<BuyProductRequest>,
) -> Result<Json<OrderPlacedResponse>, ApiError> {
    let order_id = state.purchase.buy(req.product_id, req.user_id).await?;

    // The purchase decremented stock; drop the cached read model.
    state.products.invalidate(req.product_id).await;

    Ok(Json(OrderPlacedResponse { order_id }))
}
