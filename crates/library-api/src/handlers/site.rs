//! Home page.

use axum::extract::State;
use tracing::warn;

use crate::extractors::Ctx;
use crate::handlers::PageResult;
use crate::state::AppState;
use crate::view::{View, page};

/// GET /
///
/// A failure to count is shown on the page itself rather than through the
/// error page.
pub async fn index(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let view = View::new("index", "Local Library Home");
    let view = match state.site.counts().await {
        Ok(data) => view.with("data", data),
        Err(e) => {
            warn!(error = %e, "Failed to count library records");
            view.with("err", e.message)
        }
    };
    page(&state, &ctx, view).await
}
