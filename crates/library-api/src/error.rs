//! Maps domain `AppError` to HTTP responses.
//!
//! The response produced here carries an [`ErrorReport`] extension; the
//! error page itself is rendered by
//! [`crate::middleware::error::render_errors`], which knows the run mode.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use library_core::error::{AppError, ErrorKind};

/// An application error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// What the error page needs to know about a failure.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Message plus cause chain; shown only in development.
    pub detail: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Store
        | ErrorKind::Session
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);
        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.detail(), "Request failed");
        } else {
            tracing::debug!(kind = %err.kind, error = %err.message, "Request rejected");
        }

        let report = ErrorReport {
            kind: err.kind,
            message: err.message.clone(),
            detail: err.detail(),
        };
        let mut response = (status, err.message).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError(AppError::not_found("Author not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().expect("report");
        assert_eq!(report.message, "Author not found");
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        assert_eq!(
            status_for(ErrorKind::Store),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ErrorKind::Session),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
