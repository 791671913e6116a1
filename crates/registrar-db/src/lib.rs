//! # Registrar DB
//!
//! The record store behind every CRUD operation.
//!
//! - [`store`]: the [`RecordStore`] trait handlers depend on
//! - [`postgres`]: the PostgreSQL implementation ([`PgStore`])
//! - `memory`: an in-memory implementation (feature `memory`), used by tests
//! - [`error`]: [`StoreError`] and its mapping onto HTTP errors
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::DatabaseConfig;
//! use registrar_db::PgStore;
//!
//! let store = PgStore::connect(&DatabaseConfig::from_env()).await?;
//! store.migrate().await?;
//! ```

pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Page, RecordStore};
