//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod session;

pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
pub use session::{Connector, Session};
