//! Access guards applied as route layers.
//!
//! Each guard reads the [`RequestContext`] placed by the session middleware,
//! asks the matching pure decision function in `library_auth::guard`, and
//! either continues or redirects with `302 Found`.

use std::collections::HashMap;

use axum::extract::{Path, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use library_auth::guard::{self, GuardDecision};
use library_auth::{Operation, Principal};
use library_service::RequestContext;

use crate::view::found;

fn principal(request: &Request) -> Option<&Principal> {
    request
        .extensions()
        .get::<RequestContext>()
        .and_then(RequestContext::principal)
}

async fn apply(decision: GuardDecision, request: Request, next: Next) -> Response {
    match decision {
        GuardDecision::Proceed => next.run(request).await,
        GuardDecision::Redirect(location) => {
            debug!(path = %request.uri().path(), location, "Guard redirected request");
            found(location)
        }
    }
}

/// Only anonymous visitors may pass.
pub async fn require_anonymous(request: Request, next: Next) -> Response {
    let decision = guard::anonymous_only(principal(&request));
    apply(decision, request, next).await
}

/// Only the user named by the `{id}` path parameter may pass.
pub async fn require_self(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Response {
    let id = params.get("id").map(String::as_str).unwrap_or_default();
    let decision = guard::self_or_deny(principal(&request), id);
    apply(decision, request, next).await
}

/// Only principals whose role grants `operation` may pass.
pub async fn require_permission(operation: Operation, request: Request, next: Next) -> Response {
    let decision = guard::permit(principal(&request), operation);
    apply(decision, request, next).await
}
