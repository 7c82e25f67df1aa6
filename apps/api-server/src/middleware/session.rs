//! Request-scoped database session extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use blog_core::ports::Session;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// A database session opened for the current request.
///
/// The underlying connection is closed when the handler returns and the
/// extractor is dropped, whether the handler succeeded or failed:
/// ```ignore
/// async fn list_users(db: Db) -> AppResult<HttpResponse> {
///     Ok(HttpResponse::Ok().json(db.users().list().await?))
/// }
/// ```
pub struct Db(Box<dyn Session>);

impl Deref for Db {
    type Target = dyn Session;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl FromRequest for Db {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                AppError::Internal("AppState not found in app data".to_string())
            })?;

            let session = state.connector.connect().await?;
            tracing::debug!("Database session opened");

            Ok(Db(session))
        })
    }
}
