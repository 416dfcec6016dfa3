//! Session loading middleware.
//!
//! Every request gets a session: the cookie token is looked up, and when it
//! is missing, unknown or expired a fresh anonymous session is issued. The
//! session's user id is resolved to a principal and the resulting
//! [`RequestContext`] is inserted into the request extensions.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use library_core::config::SessionConfig;
use library_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Loads or creates the session and attaches the request context.
pub async fn load_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let config = &state.config.session;

    let existing = match jar.get(&config.cookie_name) {
        Some(cookie) => state.sessions.load(cookie.value()).await?,
        None => None,
    };
    let (session, issued_token) = match existing {
        Some(session) => (session, None),
        None => {
            let issued = state.sessions.create().await?;
            (issued.session, Some(issued.token))
        }
    };

    let principal = match session.user_id {
        Some(user_id) => state.resolver.deserialize(user_id).await?,
        None => None,
    };
    request
        .extensions_mut()
        .insert(RequestContext::new(session.id, principal));

    let response = next.run(request).await;

    // A handler that already set the cookie (login, logout) wins.
    match issued_token {
        Some(token) if !sets_cookie(&response, &config.cookie_name) => {
            Ok((jar.add(session_cookie(config, token)), response).into_response())
        }
        _ => Ok(response),
    }
}

/// Build the session cookie carrying `token`.
pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

/// Cookie used to clear the session cookie.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|v| v.starts_with(&prefix)))
}
