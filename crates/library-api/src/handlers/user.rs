//! Login, registration, logout and profile handlers.

use axum::Form;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use library_entity::FlashMessage;
use library_service::{FormOutcome, LoginResult, RawForm};

use crate::extractors::Ctx;
use crate::handlers::PageResult;
use crate::middleware::session::{removal_cookie, session_cookie};
use crate::state::AppState;
use crate::view::{View, found, page, principal_view, role_options};

/// GET /user/login
pub async fn login_form(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    page(&state, &ctx, View::new("user/login", "Login")).await
}

/// POST /user/login
///
/// Success rotates the session token; failure has already queued the
/// reason as a flash message.
pub async fn login(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    jar: CookieJar,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.accounts.login(&ctx, RawForm::new(body)).await? {
        LoginResult::Authenticated { token, principal } => {
            info!(user_id = %principal.id, "User logged in");
            let jar = jar.add(session_cookie(&state.config.session, token));
            Ok((jar, found("/")).into_response())
        }
        LoginResult::Rejected(_) => Ok(found("/user/login")),
    }
}

/// GET /user/logout
pub async fn logout(State(state): State<AppState>, Ctx(ctx): Ctx, jar: CookieJar) -> PageResult {
    state.accounts.logout(&ctx).await?;
    let jar = jar.remove(removal_cookie(&state.config.session));
    Ok((jar, found("/")).into_response())
}

/// GET /user/register
pub async fn register_form(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    page(&state, &ctx, View::new("user/register", "Register")).await
}

/// POST /user/register
pub async fn register(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.users.register(RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => {
            state
                .accounts
                .flash(&ctx, FlashMessage::info("Registration successful. Please log in."))
                .await?;
            Ok(found(&url))
        }
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("user/register", "Register")
                .with("user", draft)
                .with_errors(&errors);
            page(&state, &ctx, view).await
        }
    }
}

/// GET /user/{id}
pub async fn profile(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let user = state.users.profile(&id).await?;
    let view = View::new("user/profile", format!("User: {}", user.username))
        .with("user", principal_view(&user));
    page(&state, &ctx, view).await
}

/// GET /user/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let user = state.users.profile(&id).await?;
    let view = View::new("user/update", "Update Profile")
        .with("user", principal_view(&user))
        .with("roles", role_options())
        .with("can_change_role", ctx.is_admin());
    page(&state, &ctx, view).await
}

/// POST /user/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.users.update(&ctx, &id, RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("user/update", "Update Profile")
                .with("user", draft)
                .with("roles", role_options())
                .with("can_change_role", ctx.is_admin())
                .with_errors(&errors);
            page(&state, &ctx, view).await
        }
    }
}
