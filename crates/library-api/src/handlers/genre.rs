//! Genre handlers.

use axum::Form;
use axum::extract::{Path, State};
use serde_json::Value;

use library_entity::{Book, Genre};
use library_service::{DeleteOutcome, FormOutcome, RawForm};

use crate::extractors::Ctx;
use crate::handlers::PageResult;
use crate::state::AppState;
use crate::view::{View, found, page};

fn books_view(books: &[Book]) -> Vec<Value> {
    books.iter().map(Book::view).collect()
}

/// GET /catalog/genres
pub async fn list(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let genres: Vec<Value> = state.genres.list().await?.iter().map(Genre::view).collect();
    page(&state, &ctx, View::new("genre/list", "Genre lists").with("genres", genres)).await
}

/// GET /catalog/genre/{id}
pub async fn detail(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let detail = state.genres.detail(&id).await?;
    let view = View::new("genre/detail", "Genre Detail")
        .with("genre", detail.genre.view())
        .with("books", books_view(&detail.books));
    page(&state, &ctx, view).await
}

/// GET /catalog/genre/create
pub async fn create_form(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    page(&state, &ctx, View::new("genre/create", "Create Genre")).await
}

/// POST /catalog/genre/create
pub async fn create(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.genres.create(RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("genre/create", "Create Genre")
                .with("genre", draft)
                .with_errors(&errors);
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/genre/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let genre = state.genres.get(&id).await?;
    let view = View::new("genre/update", "Update Genre").with("genre", genre.view());
    page(&state, &ctx, view).await
}

/// POST /catalog/genre/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.genres.update(&id, RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("genre/update", "Update Genre")
                .with("genre", draft)
                .with_errors(&errors);
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/genre/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let Some(detail) = state.genres.delete_view(&id).await? else {
        return Ok(found("/catalog/genres"));
    };
    let view = View::new("genre/delete", format!("Delete Genre: {}", detail.genre.name))
        .with("genre", detail.genre.view())
        .with("books", books_view(&detail.books));
    page(&state, &ctx, view).await
}

/// POST /catalog/genre/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    match state.genres.delete(&id).await? {
        DeleteOutcome::Deleted(url) => Ok(found(&url)),
        DeleteOutcome::Blocked(detail) => {
            let view = View::new("genre/delete", "Delete Genre")
                .with("genre", detail.genre.view())
                .with("books", books_view(&detail.books));
            page(&state, &ctx, view).await
        }
    }
}
