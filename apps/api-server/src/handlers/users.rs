//! User handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{NewUser, Resource, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, UserRepository};
use blog_shared::dto::DeletedResponse;

use crate::middleware::error::AppResult;
use crate::middleware::session::Db;

/// POST /users
pub async fn create(body: web::Json<NewUser>, db: Db) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    let id = db.users().create(draft.clone()).await?;

    Ok(HttpResponse::Ok().json(draft.with_id(id)))
}

/// GET /users
pub async fn list(db: Db) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(db.users().list().await?))
}

/// GET /users/{id}
pub async fn get(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    let user = db
        .users()
        .find_by_id(path.into_inner())
        .await?
        .ok_or(RepoError::NotFound(User::NAME))?;

    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id}
pub async fn update(
    path: web::Path<i32>,
    body: web::Json<NewUser>,
    db: Db,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let draft = body.into_inner();
    db.users().update(id, draft.clone()).await?;

    Ok(HttpResponse::Ok().json(draft.with_id(id)))
}

/// DELETE /users/{id}
pub async fn delete(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    db.users().delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DeletedResponse::new(User::NAME)))
}

/// GET /users/{id}/posts
pub async fn posts(path: web::Path<i32>, db: Db) -> AppResult<HttpResponse> {
    let user_posts = db.users().find_posts(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user_posts))
}
