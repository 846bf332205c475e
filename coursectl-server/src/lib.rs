//! coursectl-server: students, courses, and enrollments over HTTP
//!
//! Layers, bottom up:
//! - `models`: records and validated inputs
//! - `db`: the `CourseStore` trait with PostgreSQL and in-memory stores
//! - `domain`: enrollment rules, catalog operations, sample data
//! - `http`: axum router, middleware, error mapping

pub mod config;
pub mod db;
pub mod domain;
pub mod http;
pub mod models;

pub use config::{resolve_database_url, DatabaseSettings};
pub use db::{CourseStore, DbError, MemoryStore, PgStore};
pub use domain::{DomainError, SeedOutcome};
pub use http::{build_router, run_server, AppState, CorsConfig, ServerConfig};
