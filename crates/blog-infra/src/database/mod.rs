//! Database access: per-request connections, repositories and schema bootstrap.

mod connections;
mod postgres_base;
pub mod postgres_repo;
pub mod schema;

pub mod entity;

pub use connections::{DatabaseConfig, PostgresConnector, PostgresSession};
pub use postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
pub use schema::{InitError, RetryPolicy, SchemaScript};

#[cfg(test)]
mod tests;
