//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};

use blog_core::domain::{
    CommentSummary, Post, PostComments, PostSummary, Resource, User, UserPosts,
};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// One row of `posts JOIN users`.
#[derive(Debug, FromQueryResult)]
struct UserPostRow {
    user_id: i32,
    user_name: String,
    user_email: String,
    post_id: i32,
    title: String,
    body: String,
}

/// One row of `comments JOIN posts`.
#[derive(Debug, FromQueryResult)]
struct PostCommentRow {
    post_id: i32,
    user_id: i32,
    title: String,
    post_body: String,
    comment_id: i32,
    comment_body: String,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_posts(&self, user_id: i32) -> Result<UserPosts, RepoError> {
        let rows = PostEntity::find()
            .select_only()
            .column_as(user::Column::Id, "user_id")
            .column_as(user::Column::Name, "user_name")
            .column_as(user::Column::Email, "user_email")
            .column_as(post::Column::Id, "post_id")
            .column_as(post::Column::Title, "title")
            .column_as(post::Column::Body, "body")
            .inner_join(UserEntity)
            .filter(user::Column::Id.eq(user_id))
            .into_model::<UserPostRow>()
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        // An empty join means either "no posts" or "no user".
        let Some(first) = rows.first() else {
            tracing::debug!(user_id, "No joined posts, checking user exists");
            let user = UserEntity::find_by_id(user_id)
                .one(self.conn())
                .await
                .map_err(map_db_err)?
                .ok_or(RepoError::NotFound(User::NAME))?;

            return Ok(UserPosts {
                user: user.into(),
                posts: Vec::new(),
            });
        };

        let user = User {
            id: first.user_id,
            name: first.user_name.clone(),
            email: first.user_email.clone(),
        };
        let posts = rows
            .into_iter()
            .map(|row| PostSummary {
                id: row.post_id,
                title: row.title,
                body: row.body,
            })
            .collect();

        Ok(UserPosts { user, posts })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_comments(&self, post_id: i32) -> Result<PostComments, RepoError> {
        let rows = CommentEntity::find()
            .select_only()
            .column_as(post::Column::Id, "post_id")
            .column_as(post::Column::UserId, "user_id")
            .column_as(post::Column::Title, "title")
            .column_as(post::Column::Body, "post_body")
            .column_as(comment::Column::Id, "comment_id")
            .column_as(comment::Column::Body, "comment_body")
            .column_as(comment::Column::CreatedAt, "created_at")
            .inner_join(PostEntity)
            .filter(post::Column::Id.eq(post_id))
            .into_model::<PostCommentRow>()
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        let Some(first) = rows.first() else {
            tracing::debug!(post_id, "No joined comments, checking post exists");
            let post = PostEntity::find_by_id(post_id)
                .one(self.conn())
                .await
                .map_err(map_db_err)?
                .ok_or(RepoError::NotFound(Post::NAME))?;

            return Ok(PostComments {
                post: post.into(),
                comments: Vec::new(),
            });
        };

        let post = Post {
            id: first.post_id,
            user_id: first.user_id,
            title: first.title.clone(),
            body: first.post_body.clone(),
        };
        let comments = rows
            .into_iter()
            .map(|row| CommentSummary {
                id: row.comment_id,
                body: row.comment_body,
                created_at: row.created_at.into(),
            })
            .collect();

        Ok(PostComments { post, comments })
    }
}

impl CommentRepository for PostgresCommentRepository {}
