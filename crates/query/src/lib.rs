//! Read side of the inventory API.
//!
//! Provides a TTL cache and the cache-aside product lookup used by the
//! read-heavy `GET /api/v1/product/{id}` path.

pub mod cache;
pub mod product;

pub use cache::TtlCache;
pub use product::{ProductLookup, ProductView};
