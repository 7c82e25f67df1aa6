use async_trait::async_trait;

use crate::domain::{
    Comment, NewComment, NewPost, NewUser, Post, PostComments, User, UserPosts,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `N` carries the mutable fields submitted on create and update.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Insert a new row and return its database-assigned id.
    async fn create(&self, draft: N) -> Result<ID, RepoError>;

    /// Every row, in whatever order the database returns them.
    async fn list(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Overwrite all mutable fields. Fails with `NotFound` when no row matched.
    async fn update(&self, id: ID, draft: N) -> Result<(), RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, i32> {
    /// A user and all of their posts. Fails with `NotFound` if the user is absent.
    async fn find_posts(&self, user_id: i32) -> Result<UserPosts, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, i32> {
    /// A post and all of its comments. Fails with `NotFound` if the post is absent.
    async fn find_comments(&self, post_id: i32) -> Result<PostComments, RepoError>;
}

/// Comment repository.
pub trait CommentRepository: BaseRepository<Comment, NewComment, i32> {}
