//! `Ctx` extractor. Hands the request context built by the session
//! middleware to handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use library_core::error::AppError;
use library_service::RequestContext;

use crate::error::ApiError;

/// The current request's session and principal.
#[derive(Debug, Clone)]
pub struct Ctx(pub RequestContext);

impl std::ops::Deref for Ctx {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Ctx)
            .ok_or_else(|| ApiError(AppError::session("Request context missing")))
    }
}
