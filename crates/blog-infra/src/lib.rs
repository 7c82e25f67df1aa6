//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! SeaORM repositories over PostgreSQL, a connector that opens one
//! connection per request, and the startup schema initializer.

pub mod database;

pub use database::{DatabaseConfig, PostgresConnector};
