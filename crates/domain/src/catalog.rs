//! Catalog workflows: product creation and inventory increase.

use common::ProductId;

use crate::entities::NewProduct;
use crate::error::DomainError;
use crate::store::Store;
use crate::value_objects::{Discount, InventoryCount, Price, Title, ValueError};

/// Lowercases and trims a title for uniqueness comparison.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Request shape for creating a product.
///
/// Raw values; validation happens when the value objects are constructed.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub title: String,
    pub price: i32,
    pub discount: i32,
}

/// Service for managing the product catalog.
pub struct CatalogService<S> {
    store: S,
}

impl<S: Store> CatalogService<S> {
    /// Creates a new catalog service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a product with zero starting inventory and returns its id.
    ///
    /// The title must be unique under case/whitespace normalization.
    #[tracing::instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_product(&self, request: CreateProduct) -> Result<ProductId, DomainError> {
        let title = Title::new(request.title)?;
        let price = Price::new(request.price)?;
        let discount = Discount::new(request.discount)?;

        if self.store.title_exists(&title.normalized()).await? {
            return Err(DomainError::TitleExists {
                title: title.as_str().to_string(),
            });
        }

        let id = self
            .store
            .insert_product(NewProduct {
                title,
                price,
                discount,
            })
            .await?;

        metrics::counter!("products_created_total").increment(1);
        tracing::info!(%id, "product created");
        Ok(id)
    }

    /// Adds `quantity` units to a product's stock and returns the new count.
    #[tracing::instrument(skip(self))]
    pub async fn increase_inventory(
        &self,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<i32, DomainError> {
        if quantity < 0 {
            return Err(ValueError::Negative { field: "Quantity" }.into());
        }

        let product = self
            .store
            .product_by_id(product_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Product",
                id: product_id.as_i32(),
            })?;

        let raw = product
            .inventory_count()
            .value()
            .checked_add(quantity)
            .ok_or(ValueError::OutOfRange {
                field: "Inventory count",
                min: 0,
                max: i32::MAX,
            })?;
        let new_count = InventoryCount::new(raw)?;

        self.store.set_inventory(product_id, new_count).await?;

        tracing::info!(%product_id, count = new_count.value(), "inventory increased");
        Ok(new_count.value())
    }
}
