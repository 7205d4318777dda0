//! The transactional buy-product workflow.

use common::{OrderId, ProductId, UserId};

use crate::error::DomainError;
use crate::store::Store;

/// Service executing purchases.
///
/// Holds no state between calls; every invocation reads through the store,
/// validates the purchase gates, and delegates the atomic write phase to
/// [`crate::store::PurchaseStore::commit_purchase`].
pub struct PurchaseService<S> {
    store: S,
}

impl<S: Store> PurchaseService<S> {
    /// Creates a new purchase service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Buys one unit of a product for a user and returns the new order id.
    ///
    /// Gates, in order, each a hard stop:
    /// 1. the product must exist,
    /// 2. the user must exist,
    /// 3. the product must have stock,
    /// 4. the buyer must not already have an order for the product.
    ///
    /// The write phase then decrements inventory by exactly one and inserts
    /// the order inside a single transaction, re-checking gates 3 and 4
    /// under the database's locking so concurrent purchases of the last
    /// unit produce exactly one winner.
    #[tracing::instrument(skip(self))]
    pub async fn buy(&self, product_id: ProductId, user_id: UserId) -> Result<OrderId, DomainError> {
        let product = self
            .store
            .product_by_id(product_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Product",
                id: product_id.as_i32(),
            })?;

        self.store
            .user_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                id: user_id.as_i32(),
            })?;

        if product.inventory_count().value() <= 0 {
            metrics::counter!("purchases_rejected_total").increment(1);
            return Err(DomainError::OutOfStock {
                product: product_id,
            });
        }

        if self.store.order_exists_for(product_id, user_id).await? {
            metrics::counter!("purchases_rejected_total").increment(1);
            return Err(DomainError::DuplicateOrder {
                product: product_id,
                user: user_id,
            });
        }

        // These reads are stale by the time the transaction opens; the store
        // re-validates both conditions inside it and loses gracefully.
        let order_id = self.store.commit_purchase(product_id, user_id).await?;

        metrics::counter!("purchases_completed_total").increment(1);
        tracing::info!(%product_id, %user_id, %order_id, "purchase committed");
        Ok(order_id)
    }
}

#[cfg(test)]
mod tests {
    use common::{ProductId, UserId};
    use domain::catalog::{CatalogService, CreateProduct};
    use domain::error::DomainError;
    use domain::purchase::PurchaseService;
    use domain::store::{OrderStore, ProductStore};
    use domain::value_objects::UserName;
    use store::InMemoryStore;

    async fn stocked_product(store: &InMemoryStore, stock: i32) -> ProductId {
        let catalog = CatalogService::new(store.clone());
        let id = catalog
            .create_product(CreateProduct {
                title: "Widget".to_string(),
                price: 98_000,
                discount: 10,
            })
            .await
            .unwrap();
        if stock > 0 {
            catalog.increase_inventory(id, stock).await.unwrap();
        }
        id
    }

    #[tokio::test]
    async fn buy_decrements_inventory_and_creates_one_order() {
        let store = InMemoryStore::new();
        let product_id = stocked_product(&store, 10).await;
        let user_id = store.add_user(UserName::new("Alice").unwrap()).await;

        let service = PurchaseService::new(store.clone());
        let order_id = service.buy(product_id, user_id).await.unwrap();

        let product = store.product_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.inventory_count().value(), 9);

        let order = store.order_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(order.product_id(), product_id);
        assert_eq!(order.buyer_id(), user_id);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn buy_missing_product_is_not_found() {
        let store = InMemoryStore::new();
        let user_id = store.add_user(UserName::new("Alice").unwrap()).await;

        let service = PurchaseService::new(store);
        let err = service.buy(ProductId::new(404), user_id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "Product",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn buy_missing_user_is_not_found() {
        let store = InMemoryStore::new();
        let product_id = stocked_product(&store, 5).await;

        let service = PurchaseService::new(store);
        let err = service
            .buy(product_id, UserId::new(404))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "User", .. }
        ));
    }

    #[tokio::test]
    async fn buy_with_zero_stock_fails_without_writes() {
        let store = InMemoryStore::new();
        let product_id = stocked_product(&store, 0).await;
        let user_id = store.add_user(UserName::new("Alice").unwrap()).await;

        let service = PurchaseService::new(store.clone());
        let err = service.buy(product_id, user_id).await.unwrap_err();
        assert!(matches!(err, DomainError::OutOfStock { .. }));

        assert_eq!(store.order_count().await, 0);
        let product = store.product_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.inventory_count().value(), 0);
    }

    #[tokio::test]
    async fn repeat_buy_for_same_pair_fails_without_writes() {
        let store = InMemoryStore::new();
        let product_id = stocked_product(&store, 10).await;
        let user_id = store.add_user(UserName::new("Alice").unwrap()).await;

        let service = PurchaseService::new(store.clone());
        service.buy(product_id, user_id).await.unwrap();

        let err = service.buy(product_id, user_id).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateOrder { .. }));

        // Inventory stays at 9 and no second order appears.
        let product = store.product_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.inventory_count().value(), 9);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn different_users_can_buy_the_same_product() {
        let store = InMemoryStore::new();
        let product_id = stocked_product(&store, 2).await;
        let alice = store.add_user(UserName::new("Alice").unwrap()).await;
        let bob = store.add_user(UserName::new("Bob").unwrap()).await;

        let service = PurchaseService::new(store.clone());
        service.buy(product_id, alice).await.unwrap();
        service.buy(product_id, bob).await.unwrap();

        let product = store.product_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.inventory_count().value(), 0);
        assert!(store.order_exists_for(product_id, alice).await.unwrap());
        assert!(store.order_exists_for(product_id, bob).await.unwrap());
    }
}
