//! Database layer - connection pool, schema, and stores
//!
//! # Design Principles
//!
//! - Bounded connection pool; callers past the bound wait for a connection
//! - The store is an injected handle (`Arc<dyn CourseStore>`), never a global
//! - Unique constraints in the schema are authoritative; application checks
//!   only produce friendlier errors
//! - Transactions for multi-step operations (seed, clear)

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::{CourseStore, SeedBatch};
