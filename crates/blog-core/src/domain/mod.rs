//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentSummary, NewComment, PostComments};
pub use post::{NewPost, Post, PostSummary, UserPosts};
pub use user::{NewUser, User};

/// A persisted resource with a human-readable name used in error messages.
pub trait Resource {
    const NAME: &'static str;
}
