use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Post, Resource};

/// Comment entity - a reply attached to a post.
///
/// `created_at` is assigned by the database at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: i32,
    pub body: String,
}

/// A comment as listed under its post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentSummary {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

/// A post together with every comment attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostComments {
    pub post: Post,
    pub comments: Vec<CommentSummary>,
}

impl Resource for Comment {
    const NAME: &'static str = "Comment";
}
