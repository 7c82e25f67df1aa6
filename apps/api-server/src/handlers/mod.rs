//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod users;


use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure extractor settings and all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create))
                .route("", web::get().to(users::list))
                .route("/{id}", web::get().to(users::get))
                .route("/{id}", web::put().to(users::update))
                .route("/{id}", web::delete().to(users::delete))
                .route("/{id}/posts", web::get().to(users::posts)),
        )
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create))
                .route("", web::get().to(posts::list))
                .route("/{id}", web::get().to(posts::get))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::delete))
                .route("/{id}/comments", web::get().to(posts::comments)),
        )
        .service(
            web::scope("/comments")
                .route("", web::post().to(comments::create))
                .route("", web::get().to(comments::list))
                .route("/{id}", web::get().to(comments::get))
                .route("/{id}", web::put().to(comments::update))
                .route("/{id}", web::delete().to(comments::delete)),
        );
}
