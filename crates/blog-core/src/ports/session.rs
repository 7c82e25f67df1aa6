//! Scoped database sessions.

use async_trait::async_trait;

use super::{CommentRepository, PostRepository, UserRepository};
use crate::error::RepoError;

/// Opens a fresh database connection on every call.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Session>, RepoError>;
}

/// Repositories bound to a single connection.
///
/// The connection is released when the session is dropped.
pub trait Session: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn posts(&self) -> &dyn PostRepository;
    fn comments(&self) -> &dyn CommentRepository;
}
