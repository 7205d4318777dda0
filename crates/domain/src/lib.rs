//! Domain layer for the inventory API.
//!
//! This crate provides the core building blocks:
//! - Self-validating value objects (title, price, discount, inventory count, user name)
//! - Product, User, and Order entities
//! - Narrow storage ports implemented by the `store` crate
//! - The catalog and purchase workflow services

pub mod catalog;
pub mod entities;
pub mod error;
pub mod purchase;
pub mod store;
pub mod value_objects;

pub use catalog::{CatalogService, CreateProduct, normalize_title};
pub use common::{OrderId, ProductId, UserId};
pub use entities::{NewProduct, Order, Product, User};
pub use error::{DomainError, StoreError};
pub use purchase::PurchaseService;
pub use store::{OrderStore, ProductStore, PurchaseStore, Store, UserStore};
pub use value_objects::{Discount, InventoryCount, Price, Title, UserName, ValueError};
