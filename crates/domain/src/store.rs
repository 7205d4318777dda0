//! Storage ports implemented by the `store` crate.
//!
//! One narrow trait per aggregate instead of a generic repository: each
//! workflow names exactly the operations it needs, and test doubles only
//! have to cover those.

use async_trait::async_trait;
use common::{OrderId, ProductId, UserId};

use crate::entities::{NewProduct, Order, Product, User};
use crate::error::StoreError;
use crate::value_objects::InventoryCount;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Product reads and writes.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Loads a product by id. Returns `None` if it does not exist.
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Inserts a new product with zero inventory and returns its assigned id.
    ///
    /// Fails with [`StoreError::DuplicateTitle`] if another product's
    /// normalized title collides (the check-then-insert race is closed by
    /// a unique index).
    async fn insert_product(&self, product: NewProduct) -> Result<ProductId>;

    /// Replaces a product's inventory count.
    async fn set_inventory(&self, id: ProductId, count: InventoryCount) -> Result<()>;

    /// Returns whether any product's normalized title equals `normalized_title`.
    async fn title_exists(&self, normalized_title: &str) -> Result<bool>;
}

/// User reads. Accounts are seeded externally, so there are no writes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Loads a user by id. Returns `None` if it does not exist.
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>>;
}

/// Order reads.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Loads an order by id. Returns `None` if it does not exist.
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Returns whether an order already exists for this (product, buyer) pair.
    async fn order_exists_for(&self, product: ProductId, buyer: UserId) -> Result<bool>;
}

/// The atomic write phase of a purchase.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Decrements the product's inventory by exactly one and inserts the
    /// order row, in one transaction.
    ///
    /// Both gates are re-validated inside the transaction:
    /// - the decrement is conditional on `inventory_count > 0` and fails
    ///   with [`StoreError::InventoryExhausted`] otherwise;
    /// - the insert fails with [`StoreError::DuplicateOrder`] if the
    ///   (product, buyer) pair already has an order.
    ///
    /// On any failure the transaction rolls back; either both writes become
    /// durable or neither does.
    async fn commit_purchase(&self, product: ProductId, buyer: UserId) -> Result<OrderId>;
}

/// Convenience supertrait for adapters that back the whole service.
pub trait Store: ProductStore + UserStore + OrderStore + PurchaseStore {}

impl<T> Store for T where T: ProductStore + UserStore + OrderStore + PurchaseStore {}
