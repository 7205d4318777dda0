//! Storage adapters for the inventory API.
//!
//! Two implementations of the domain's storage ports:
//! - [`PostgresStore`] — the production adapter, backed by sqlx.
//! - [`InMemoryStore`] — same interface over in-process state, for tests
//!   and local runs without a database.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
