//! In-memory storage adapter for tests and local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{OrderId, ProductId, UserId};
use domain::entities::{NewProduct, Order, Product, User};
use domain::store::{OrderStore, ProductStore, PurchaseStore, Result, UserStore};
use domain::value_objects::{InventoryCount, UserName};
use domain::StoreError;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    products: HashMap<ProductId, Product>,
    users: HashMap<UserId, User>,
    orders: HashMap<OrderId, Order>,
    next_product_id: i32,
    next_user_id: i32,
    next_order_id: i32,
    fail_next_purchase: bool,
}

/// In-memory store implementation.
///
/// All state lives behind one `RwLock`; `commit_purchase` takes the write
/// lock for its whole critical section, so the write phase is atomic and
/// concurrent purchases are serialized exactly like they are by the
/// database's row locking.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user and returns the assigned id.
    pub async fn add_user(&self, name: UserName) -> UserId {
        let mut state = self.state.write().await;
        state.next_user_id += 1;
        let id = UserId::new(state.next_user_id);
        state.users.insert(id, User::new(id, name));
        id
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Makes the next `commit_purchase` fail after its in-transaction
    /// validation, leaving state untouched. Exercises the rollback path.
    pub async fn inject_purchase_failure(&self) {
        self.state.write().await.fail_next_purchase = true;
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn insert_product(&self, product: NewProduct) -> Result<ProductId> {
        let mut state = self.state.write().await;

        let normalized = product.title.normalized();
        if state
            .products
            .values()
            .any(|p| p.title().normalized() == normalized)
        {
            return Err(StoreError::DuplicateTitle(normalized));
        }

        state.next_product_id += 1;
        let id = ProductId::new(state.next_product_id);
        state.products.insert(
            id,
            Product::new(
                id,
                product.title,
                InventoryCount::zero(),
                product.price,
                product.discount,
            ),
        );
        Ok(id)
    }

    async fn set_inventory(&self, id: ProductId, count: InventoryCount) -> Result<()> {
        let mut state = self.state.write().await;
        match state.products.remove(&id) {
            Some(product) => {
                state.products.insert(id, product.with_inventory(count));
                Ok(())
            }
            None => Err(StoreError::backend(std::io::Error::other(format!(
                "product {id} does not exist"
            )))),
        }
    }

    async fn title_exists(&self, normalized_title: &str) -> Result<bool> {
        Ok(self
            .state
            .read()
            .await
            .products
            .values()
            .any(|p| p.title().normalized() == normalized_title))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn order_exists_for(&self, product: ProductId, buyer: UserId) -> Result<bool> {
        Ok(self
            .state
            .read()
            .await
            .orders
            .values()
            .any(|o| o.product_id() == product && o.buyer_id() == buyer))
    }
}

#[async_trait]
impl PurchaseStore for InMemoryStore {
    async fn commit_purchase(&self, product: ProductId, buyer: UserId) -> Result<OrderId> {
        let mut state = self.state.write().await;

        // Re-validate both gates under the write lock, mirroring the
        // database adapter's in-transaction checks.
        let current = match state.products.get(&product) {
            Some(p) if p.inventory_count().value() > 0 => p.inventory_count().value(),
            _ => return Err(StoreError::InventoryExhausted(product)),
        };

        if state
            .orders
            .values()
            .any(|o| o.product_id() == product && o.buyer_id() == buyer)
        {
            return Err(StoreError::DuplicateOrder {
                product,
                user: buyer,
            });
        }

        if state.fail_next_purchase {
            state.fail_next_purchase = false;
            return Err(StoreError::backend(std::io::Error::other(
                "injected purchase failure",
            )));
        }

        // Past the failure points: apply both writes together.
        let decremented = InventoryCount::new(current - 1)?;
        if let Some(p) = state.products.remove(&product) {
            state.products.insert(product, p.with_inventory(decremented));
        }

        state.next_order_id += 1;
        let order_id = OrderId::new(state.next_order_id);
        state
            .orders
            .insert(order_id, Order::new(order_id, product, buyer, Utc::now()));

        Ok(order_id)
    }
}
