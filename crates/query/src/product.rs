//! Cache-aside product lookup with discount applied for display.

use std::time::Duration;

use common::ProductId;
use domain::entities::Product;
use domain::store::ProductStore;
use domain::DomainError;
use serde::Serialize;

use crate::cache::TtlCache;

/// Default cache time-to-live for product reads.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// The read model returned to API callers.
///
/// `price` is the effective display price, i.e. the stored price minus the
/// discount amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub inventory_count: i32,
    pub price: i32,
    pub discount: i32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            title: product.title().as_str().to_string(),
            inventory_count: product.inventory_count().value(),
            price: product.effective_price(),
            discount: product.discount().value(),
        }
    }
}

/// Cached product reads.
#[derive(Debug, Clone)]
pub struct ProductLookup<S> {
    store: S,
    cache: TtlCache<ProductId, Product>,
}

impl<S: ProductStore> ProductLookup<S> {
    /// Creates a lookup with the default 10-minute TTL.
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    /// Creates a lookup with a custom TTL.
    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        Self {
            store,
            cache: TtlCache::new(ttl),
        }
    }

    /// Returns the product view for `id`, reading through the cache.
    ///
    /// Misses are not cached: a product absent today may be created in a
    /// moment, and a negative entry would hide it for the whole TTL.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<ProductView, DomainError> {
        if let Some(product) = self.cache.get(&id).await {
            metrics::counter!("product_cache_hits").increment(1);
            return Ok(ProductView::from(&product));
        }
        metrics::counter!("product_cache_misses").increment(1);

        let product = self
            .store
            .product_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Product",
                id: id.as_i32(),
            })?;

        self.cache.set(id, product.clone()).await;
        Ok(ProductView::from(&product))
    }

    /// Drops the cached entry for `id`.
    ///
    /// Called by write paths after an inventory change so readers do not
    /// see stale stock for the rest of the TTL window.
    pub async fn invalidate(&self, id: ProductId) {
        self.cache.invalidate(&id).await;
    }
}
