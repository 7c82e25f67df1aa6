//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{NewPost, Post, Resource};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_shared::dto::DeletedResponse;

use crate::middleware::error::AppResult;
use crate::middleware::session::Db;

/// POST /posts
///
/// The owning user is not checked here; a dangling `user_id` is rejected by
/// the foreign key and surfaces as a 500.
pub async fn create(body: web::Json<NewPost>, db: Db) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    let id = db.posts().create(draft.clone()).await?;

    Ok(HttpResponse::Ok().json(draft.with_id(id)))
}

/// GET /posts
pub async fn list(db: Db) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(db.posts().list().await?))
}

/// GET /posts/{id}
pub async fn get(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    let post = db
        .posts()
        .find_by_id(path.into_inner())
        .await?
        .ok_or(RepoError::NotFound(Post::NAME))?;

    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{id}
pub async fn update(
    path: web::Path<i32>,
    body: web::Json<NewPost>,
    db: Db,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let draft = body.into_inner();
    db.posts().update(id, draft.clone()).await?;

    Ok(HttpResponse::Ok().json(draft.with_id(id)))
}

/// DELETE /posts/{id}
pub async fn delete(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    db.posts().delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DeletedResponse::new(Post::NAME)))
}

/// GET /posts/{id}/comments
pub async fn comments(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    let post_comments = db.posts().find_comments(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post_comments))
}
