//! HTTP API server for the inventory system.
//!
//! Provides REST endpoints for product management and purchasing, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use domain::{CatalogService, PurchaseService, Store};
use metrics_exporter_prometheus::PrometheusHandle;
use query::ProductLookup;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub catalog: CatalogService<S>,
    pub purchase: PurchaseService<S>,
    pub products: ProductLookup<S>,
}

/// Creates the application state from a store and a cache TTL.
pub fn create_state<S: Store + Clone + 'static>(
    store: S,
    cache_ttl: Duration,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog: CatalogService::new(store.clone()),
        purchase: PurchaseService::new(store.clone()),
        products: ProductLookup::with_ttl(store, cache_ttl),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/product/{id}", get(routes::product::get::<S>))
        .route(
            "/api/v1/product",
            post(routes::product::create::<S>).put(routes::product::increase_inventory::<S>),
        )
        .route("/api/v1/order", post(routes::order::buy::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
