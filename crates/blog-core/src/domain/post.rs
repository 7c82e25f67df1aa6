use serde::{Deserialize, Serialize};

use super::{Resource, User};

/// Post entity - represents a blog post owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub body: String,
}

/// Mutable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub body: String,
}

impl NewPost {
    /// Attach a database-assigned id.
    pub fn with_id(self, id: i32) -> Post {
        Post {
            id,
            user_id: self.user_id,
            title: self.title,
            body: self.body,
        }
    }
}

/// A post as listed under its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub body: String,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
        }
    }
}

/// A user together with every post they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosts {
    pub user: User,
    pub posts: Vec<PostSummary>,
}

impl Resource for Post {
    const NAME: &'static str = "Post";
}
