//! Product, User, and Order entities.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Discount, InventoryCount, Price, Title, UserName};

/// A catalog product and its current stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: Title,
    inventory_count: InventoryCount,
    price: Price,
    discount: Discount,
}

impl Product {
    /// Assembles a product from its identity and validated value objects.
    pub fn new(
        id: ProductId,
        title: Title,
        inventory_count: InventoryCount,
        price: Price,
        discount: Discount,
    ) -> Self {
        Self {
            id,
            title,
            inventory_count,
            price,
            discount,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn inventory_count(&self) -> InventoryCount {
        self.inventory_count
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    /// Returns a copy with the inventory count replaced.
    ///
    /// Stock changes swap in a freshly validated value object; the count is
    /// never mutated in place.
    pub fn with_inventory(self, count: InventoryCount) -> Self {
        Self {
            inventory_count: count,
            ..self
        }
    }

    /// Returns the display price after applying the discount.
    pub fn effective_price(&self) -> i32 {
        self.price.value() - self.discount.discount_amount(self.price)
    }
}

/// The shape of a product before it has an identity.
///
/// Inventory is not part of this: new products always start at zero stock
/// and receive units through the inventory-increase operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: Title,
    pub price: Price,
    pub discount: Discount,
}

/// A registered user. Read-only in this service; accounts are seeded
/// externally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
}

impl User {
    pub fn new(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }
}

/// A purchase record. Created exactly once per successful buy and
/// immutable afterward; the timestamp is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    product_id: ProductId,
    buyer_id: UserId,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: OrderId,
        product_id: ProductId,
        buyer_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            buyer_id,
            created_at,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn buyer_id(&self) -> UserId {
        self.buyer_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product::new(
            ProductId::new(1),
            Title::new("Widget").unwrap(),
            InventoryCount::new(10).unwrap(),
            Price::new(98_000).unwrap(),
            Discount::new(10).unwrap(),
        )
    }

    #[test]
    fn with_inventory_replaces_the_value_object() {
        let product = sample_product();
        let updated = product.clone().with_inventory(InventoryCount::new(9).unwrap());

        assert_eq!(updated.inventory_count().value(), 9);
        assert_eq!(updated.id(), product.id());
        assert_eq!(updated.title(), product.title());
    }

    #[test]
    fn effective_price_applies_discount() {
        assert_eq!(sample_product().effective_price(), 88_200);
    }

    #[test]
    fn effective_price_with_full_discount_is_zero() {
        let free = sample_product();
        let free = Product::new(
            free.id(),
            free.title().clone(),
            free.inventory_count(),
            free.price(),
            Discount::new(100).unwrap(),
        );
        assert_eq!(free.effective_price(), 0);
    }
}
