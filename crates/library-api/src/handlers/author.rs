//! Author handlers.

use axum::Form;
use axum::extract::{Path, State};
use serde_json::Value;

use library_entity::{Author, Book};
use library_service::{DeleteOutcome, FormOutcome, RawForm};

use crate::extractors::Ctx;
use crate::handlers::PageResult;
use crate::state::AppState;
use crate::view::{View, found, page};

fn books_view(books: &[Book]) -> Vec<Value> {
    books.iter().map(Book::view).collect()
}

/// GET /catalog/authors
pub async fn list(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let authors = state.authors.list().await?;
    let authors: Vec<Value> = authors.iter().map(Author::view).collect();
    page(&state, &ctx, View::new("author/list", "Author lists").with("authors", authors)).await
}

/// GET /catalog/author/{id}
pub async fn detail(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let detail = state.authors.detail(&id).await?;
    let view = View::new("author/detail", format!("Author Detail: {}", detail.author.name()))
        .with("author", detail.author.view())
        .with("books", books_view(&detail.books));
    page(&state, &ctx, view).await
}

/// GET /catalog/author/create
pub async fn create_form(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    page(&state, &ctx, View::new("author/create", "Create Author")).await
}

/// POST /catalog/author/create
pub async fn create(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.authors.create(RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("author/create", "Create Author")
                .with("author", draft)
                .with_errors(&errors);
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/author/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let author = state.authors.get(&id).await?;
    let view = View::new("author/update", "Update Author").with("author", author.view());
    page(&state, &ctx, view).await
}

/// POST /catalog/author/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.authors.update(&id, RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("author/update", "Update Author")
                .with("author", draft)
                .with_errors(&errors);
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/author/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let Some(detail) = state.authors.delete_view(&id).await? else {
        return Ok(found("/catalog/authors"));
    };
    let view = View::new("author/delete", format!("Delete Author: {}", detail.author.name()))
        .with("author", detail.author.view())
        .with("books", books_view(&detail.books));
    page(&state, &ctx, view).await
}

/// POST /catalog/author/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    match state.authors.delete(&id).await? {
        DeleteOutcome::Deleted(url) => Ok(found(&url)),
        DeleteOutcome::Blocked(detail) => {
            let view = View::new("author/delete", "Delete Author")
                .with("author", detail.author.view())
                .with("books", books_view(&detail.books));
            page(&state, &ctx, view).await
        }
    }
}
