//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Comment, NewComment, Resource};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;
use blog_shared::dto::{CommentResponse, DeletedResponse};

use crate::middleware::error::AppResult;
use crate::middleware::session::Db;

fn echo(id: i32, draft: NewComment) -> CommentResponse {
    CommentResponse {
        id,
        post_id: draft.post_id,
        body: draft.body,
    }
}

/// POST /comments
pub async fn create(body: web::Json<NewComment>, db: Db) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    let id = db.comments().create(draft.clone()).await?;

    Ok(HttpResponse::Ok().json(echo(id, draft)))
}

/// GET /comments
pub async fn list(db: Db) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(db.comments().list().await?))
}

/// GET /comments/{id}
pub async fn get(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    let comment = db
        .comments()
        .find_by_id(path.into_inner())
        .await?
        .ok_or(RepoError::NotFound(Comment::NAME))?;

    Ok(HttpResponse::Ok().json(comment))
}

/// PUT /comments/{id}
pub async fn update(
    path: web::Path<i32>,
    body: web::Json<NewComment>,
    db: Db,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let draft = body.into_inner();
    db.comments().update(id, draft.clone()).await?;

    Ok(HttpResponse::Ok().json(echo(id, draft)))
}

/// DELETE /comments/{id}
pub async fn delete(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    db.comments().delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DeletedResponse::new(Comment::NAME)))
}
