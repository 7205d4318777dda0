//! Domain and storage error types.

use common::{ProductId, UserId};
use thiserror::Error;

use crate::value_objects::ValueError;

/// Errors surfaced by storage adapters.
///
/// The conflict variants exist because the write phase of a purchase
/// re-validates its gates inside the database transaction; a concurrent
/// request can lose a race that the workflow's earlier checks passed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The conditional inventory decrement matched no rows: stock hit zero
    /// between the workflow's check and the write.
    #[error("product {0} is out of stock")]
    InventoryExhausted(ProductId),

    /// The order insert violated the one-order-per-(product, buyer) constraint.
    #[error("user {user} already has an open order for product {product}")]
    DuplicateOrder { product: ProductId, user: UserId },

    /// The product insert violated the normalized-title uniqueness constraint.
    #[error("a product titled '{0}' already exists")]
    DuplicateTitle(String),

    /// A stored row failed value-object validation on read.
    #[error("corrupt row: {0}")]
    CorruptRow(#[from] ValueError),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an arbitrary backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Errors returned by the workflow services.
///
/// Expected failures (not-found, conflicts, insufficient stock, validation)
/// are values with readable messages; only `Store` wraps genuinely
/// unexpected backend trouble.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A product with the same normalized title already exists.
    #[error("a product titled '{title}' already exists, try another one")]
    TitleExists { title: String },

    /// The buyer already has an open order for this product.
    #[error("you already have an open order for this product")]
    DuplicateOrder { product: ProductId, user: UserId },

    /// The product has no stock left.
    #[error("inventory count cannot go negative: product {product} is out of stock")]
    OutOfStock { product: ProductId },

    /// Input failed value-object validation.
    #[error(transparent)]
    Invalid(#[from] ValueError),

    /// The storage backend failed in an unexpected way.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        // In-transaction conflicts map to the same errors the workflow's
        // pre-checks produce, so callers see one failure shape per cause.
        match err {
            StoreError::InventoryExhausted(product) => DomainError::OutOfStock { product },
            StoreError::DuplicateOrder { product, user } => {
                DomainError::DuplicateOrder { product, user }
            }
            StoreError::DuplicateTitle(title) => DomainError::TitleExists { title },
            other => DomainError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conflicts_map_to_domain_errors() {
        let err: DomainError = StoreError::InventoryExhausted(ProductId::new(1)).into();
        assert!(matches!(err, DomainError::OutOfStock { .. }));

        let err: DomainError = StoreError::DuplicateOrder {
            product: ProductId::new(1),
            user: UserId::new(2),
        }
        .into();
        assert!(matches!(err, DomainError::DuplicateOrder { .. }));

        let err: DomainError = StoreError::DuplicateTitle("widget".into()).into();
        assert!(matches!(err, DomainError::TitleExists { .. }));
    }

    #[test]
    fn backend_errors_stay_unexpected() {
        let err: DomainError = StoreError::backend(std::io::Error::other("boom")).into();
        assert!(matches!(err, DomainError::Store(_)));
    }
}
