//! Route definitions for the Local Library.
//!
//! Routes are grouped by the guard they sit behind. Guards run as route
//! layers, after the session middleware has attached the request context.

use axum::{
    Router,
    extract::Request,
    middleware::{self as axum_middleware, Next},
    routing::get,
};

use library_auth::Operation;
use library_core::error::AppError;

use crate::error::ApiError;
use crate::handlers::{author, book, book_instance, genre, health, site, user};
use crate::middleware::{error, guard, logging, session};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Every page route runs behind the session middleware; `/health` does not,
/// so probes never create sessions.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(site::index))
        .merge(catalog_read_routes())
        .merge(permission_routes(Operation::Create, catalog_create_routes()))
        .merge(permission_routes(Operation::Update, catalog_update_routes()))
        .merge(permission_routes(Operation::Delete, catalog_delete_routes()))
        .merge(anonymous_routes())
        .merge(self_routes())
        .route("/user/logout", get(user::logout))
        .fallback(not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session::load_session,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            error::render_errors,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(pages)
        .layer(axum_middleware::from_fn(logging::request_logging))
        .with_state(state)
}

/// Lists and detail pages, open to everyone.
fn catalog_read_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/authors", get(author::list))
        .route("/catalog/author/{id}", get(author::detail))
        .route("/catalog/books", get(book::list))
        .route("/catalog/book/{id}", get(book::detail))
        .route("/catalog/genres", get(genre::list))
        .route("/catalog/genre/{id}", get(genre::detail))
        .route("/catalog/bookinstances", get(book_instance::list))
        .route("/catalog/bookinstance/{id}", get(book_instance::detail))
}

fn catalog_create_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/catalog/author/create",
            get(author::create_form).post(author::create),
        )
        .route("/catalog/book/create", get(book::create_form).post(book::create))
        .route(
            "/catalog/genre/create",
            get(genre::create_form).post(genre::create),
        )
        .route(
            "/catalog/bookinstance/create",
            get(book_instance::create_form).post(book_instance::create),
        )
}

fn catalog_update_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/catalog/author/{id}/update",
            get(author::update_form).post(author::update),
        )
        .route(
            "/catalog/book/{id}/update",
            get(book::update_form).post(book::update),
        )
        .route(
            "/catalog/genre/{id}/update",
            get(genre::update_form).post(genre::update),
        )
        .route(
            "/catalog/bookinstance/{id}/update",
            get(book_instance::update_form).post(book_instance::update),
        )
}

fn catalog_delete_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/catalog/author/{id}/delete",
            get(author::delete_form).post(author::delete),
        )
        .route(
            "/catalog/book/{id}/delete",
            get(book::delete_form).post(book::delete),
        )
        .route(
            "/catalog/genre/{id}/delete",
            get(genre::delete_form).post(genre::delete),
        )
        .route(
            "/catalog/bookinstance/{id}/delete",
            get(book_instance::delete_form).post(book_instance::delete),
        )
}

/// Guard every route in `routes` with the role permission for `operation`.
fn permission_routes(operation: Operation, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(axum_middleware::from_fn(
        move |request: Request, next: Next| guard::require_permission(operation, request, next),
    ))
}

/// Login and registration, for anonymous visitors only.
fn anonymous_routes() -> Router<AppState> {
    Router::new()
        .route("/user/login", get(user::login_form).post(user::login))
        .route("/user/register", get(user::register_form).post(user::register))
        .route_layer(axum_middleware::from_fn(guard::require_anonymous))
}

/// Profile pages, for the profile owner only.
fn self_routes() -> Router<AppState> {
    Router::new()
        .route("/user/{id}", get(user::profile))
        .route("/user/{id}/update", get(user::update_form).post(user::update))
        .route_layer(axum_middleware::from_fn(guard::require_self))
}

async fn not_found() -> ApiError {
    ApiError(AppError::not_found("Not Found"))
}
