//! Generic error page.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::json;

use crate::error::ErrorReport;
use crate::state::AppState;
use crate::view::View;

/// Replaces error responses with the rendered error view.
///
/// The cause chain is only included when the server runs in development
/// mode; in production a server error shows a generic message.
pub async fn render_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let status = response.status();
    let expose = state.config.server.mode.exposes_error_detail();
    let message = if status.is_server_error() && !expose {
        "Internal Server Error".to_string()
    } else {
        report.message
    };
    let error = if expose {
        json!({ "kind": report.kind, "detail": report.detail })
    } else {
        json!({})
    };

    let view = View::new("error", "Error")
        .with("status", status.as_u16())
        .with("message", message)
        .with("error", error);
    state.renderer.render(status, &view)
}
