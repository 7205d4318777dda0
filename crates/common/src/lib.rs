//! Shared identifier types used across the inventory API crates.

pub mod types;

pub use types::{OrderId, ProductId, UserId};
