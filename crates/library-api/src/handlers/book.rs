//! Book handlers.

use axum::Form;
use axum::extract::{Path, State};
use serde_json::Value;

use library_entity::{Author, Book, BookInstance, Genre};
use library_service::{DeleteOutcome, FormOutcome, RawForm};

use crate::error::ApiError;
use crate::extractors::Ctx;
use crate::handlers::PageResult;
use crate::state::AppState;
use crate::view::{View, found, page};

/// Book view with the author reference replaced by the author itself.
fn populated(book: &Book, author: Option<&Author>) -> Value {
    let mut view = book.view();
    if let (Some(fields), Some(author)) = (view.as_object_mut(), author) {
        fields.insert("author".into(), author.view());
    }
    view
}

fn instances_view(instances: &[BookInstance]) -> Vec<Value> {
    instances.iter().map(BookInstance::view).collect()
}

/// Attach the author and genre choices to a form view.
async fn with_options(state: &AppState, view: View) -> Result<View, ApiError> {
    let (authors, genres) = state.books.form_options().await?;
    Ok(view
        .with("authors", authors.iter().map(Author::view).collect::<Vec<_>>())
        .with("genres", genres.iter().map(Genre::view).collect::<Vec<_>>()))
}

/// GET /catalog/books
pub async fn list(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let books: Vec<Value> = state
        .books
        .list()
        .await?
        .iter()
        .map(|listing| populated(&listing.book, listing.author.as_ref()))
        .collect();
    page(&state, &ctx, View::new("book/list", "Book lists").with("books", books)).await
}

/// GET /catalog/book/{id}
pub async fn detail(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let detail = state.books.detail(&id).await?;
    let mut book = populated(&detail.book, detail.author.as_ref());
    if let Some(fields) = book.as_object_mut() {
        let genres: Vec<Value> = detail.genres.iter().map(Genre::view).collect();
        fields.insert("genre".into(), Value::Array(genres));
    }
    let view = View::new("book/detail", detail.book.title.clone())
        .with("book", book)
        .with("bookinstances", instances_view(&detail.instances));
    page(&state, &ctx, view).await
}

/// GET /catalog/book/create
pub async fn create_form(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let view = with_options(&state, View::new("book/create", "Create Book")).await?;
    page(&state, &ctx, view).await
}

/// POST /catalog/book/create
pub async fn create(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.books.create(RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("book/create", "Create Book")
                .with("book", draft)
                .with_errors(&errors);
            let view = with_options(&state, view).await?;
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/book/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let book = state.books.get(&id).await?;
    let view = View::new("book/update", "Update Book").with("book", book.view());
    let view = with_options(&state, view).await?;
    page(&state, &ctx, view).await
}

/// POST /catalog/book/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.books.update(&id, RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("book/update", "Update Book")
                .with("book", draft)
                .with_errors(&errors);
            let view = with_options(&state, view).await?;
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/book/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let Some((book, instances)) = state.books.delete_view(&id).await? else {
        return Ok(found("/catalog/books"));
    };
    let view = View::new("book/delete", format!("Delete Book: {}", book.title))
        .with("book", book.view())
        .with("bookinstances", instances_view(&instances));
    page(&state, &ctx, view).await
}

/// POST /catalog/book/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    match state.books.delete(&id).await? {
        DeleteOutcome::Deleted(url) => Ok(found(&url)),
        DeleteOutcome::Blocked((book, instances)) => {
            let view = View::new("book/delete", "Delete Book")
                .with("book", book.view())
                .with("bookinstances", instances_view(&instances));
            page(&state, &ctx, view).await
        }
    }
}
