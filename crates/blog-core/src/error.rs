//! Repository-level error types.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// Carries the resource name, e.g. `"User"`.
    #[error("{0} not found")]
    NotFound(&'static str),
}
