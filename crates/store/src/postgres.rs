//! PostgreSQL-backed storage adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use domain::entities::{NewProduct, Order, Product, User};
use domain::store::{OrderStore, ProductStore, PurchaseStore, Result, UserStore};
use domain::value_objects::{Discount, InventoryCount, Price, Title, UserName};
use domain::StoreError;
use sqlx::{PgPool, Row, postgres::PgRow};

/// Name of the unique constraint enforcing one order per (product, buyer).
const ORDER_UNIQUE_CONSTRAINT: &str = "orders_product_buyer_unique";

/// Name of the unique index on the normalized product title.
const TITLE_UNIQUE_INDEX: &str = "products_normalized_title_unique";

fn db(err: sqlx::Error) -> StoreError {
    StoreError::backend(err)
}

/// PostgreSQL storage adapter.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let id: i32 = row.try_get("id").map_err(db)?;
        let title = Title::new(row.try_get::<String, _>("title").map_err(db)?)?;
        let inventory_count =
            InventoryCount::new(row.try_get::<i32, _>("inventory_count").map_err(db)?)?;
        let price = Price::new(row.try_get::<i32, _>("price").map_err(db)?)?;
        let discount = Discount::new(row.try_get::<i32, _>("discount").map_err(db)?)?;

        Ok(Product::new(
            ProductId::new(id),
            title,
            inventory_count,
            price,
            discount,
        ))
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        Ok(Order::new(
            OrderId::new(row.try_get::<i32, _>("id").map_err(db)?),
            ProductId::new(row.try_get::<i32, _>("product_id").map_err(db)?),
            UserId::new(row.try_get::<i32, _>("buyer_id").map_err(db)?),
            row.try_get::<DateTime<Utc>, _>("creation_date").map_err(db)?,
        ))
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, title, inventory_count, price, discount FROM products WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(db)?;

        row.map(Self::row_to_product).transpose()
    }

    async fn insert_product(&self, product: NewProduct) -> Result<ProductId> {
        let normalized = product.title.normalized();

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (title, inventory_count, price, discount)
            VALUES ($1, 0, $2, $3)
            RETURNING id
            "#,
        )
        .bind(product.title.as_str())
        .bind(product.price.value())
        .bind(product.discount.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Unique-index violation: a concurrent insert won the title.
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some(TITLE_UNIQUE_INDEX)
            {
                return StoreError::DuplicateTitle(normalized.clone());
            }
            db(e)
        })?;

        Ok(ProductId::new(id))
    }

    async fn set_inventory(&self, id: ProductId, count: InventoryCount) -> Result<()> {
        let result = sqlx::query("UPDATE products SET inventory_count = $2 WHERE id = $1")
            .bind(id.as_i32())
            .bind(count.value())
            .execute(&self.pool)
            .await
            .map_err(db)?;

        if result.rows_affected() == 0 {
            return Err(db(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    async fn title_exists(&self, normalized_title: &str) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products WHERE lower(btrim(title)) = $1)",
        )
        .bind(normalized_title)
        .fetch_one(&self.pool)
        .await
        .map_err(db)
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name FROM users WHERE id = $1")
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db)?;

        match row {
            Some(row) => {
                let id: i32 = row.try_get("id").map_err(db)?;
                let name = UserName::new(row.try_get::<String, _>("name").map_err(db)?)?;
                Ok(Some(User::new(UserId::new(id), name)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, product_id, buyer_id, creation_date FROM orders WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(db)?;

        row.map(Self::row_to_order).transpose()
    }

    async fn order_exists_for(&self, product: ProductId, buyer: UserId) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE product_id = $1 AND buyer_id = $2)",
        )
        .bind(product.as_i32())
        .bind(buyer.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(db)
    }
}

#[async_trait]
impl PurchaseStore for PostgresStore {
    #[tracing::instrument(skip(self))]
    async fn commit_purchase(&self, product: ProductId, buyer: UserId) -> Result<OrderId> {
        let mut tx = self.pool.begin().await.map_err(db)?;

        // Conditional decrement: matches zero rows when stock is gone, which
        // closes the check-to-write race (the row lock serializes
        // concurrent buyers of the last unit).
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET inventory_count = inventory_count - 1
            WHERE id = $1 AND inventory_count > 0
            "#,
        )
        .bind(product.as_i32())
        .execute(&mut *tx)
        .await
        .map_err(db)?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls back.
            return Err(StoreError::InventoryExhausted(product));
        }

        let order_id: i32 = sqlx::query_scalar(
            "INSERT INTO orders (product_id, buyer_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(product.as_i32())
        .bind(buyer.as_i32())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some(ORDER_UNIQUE_CONSTRAINT)
            {
                return StoreError::DuplicateOrder {
                    product,
                    user: buyer,
                };
            }
            db(e)
        })?;

        tx.commit().await.map_err(db)?;
        Ok(OrderId::new(order_id))
    }
}
