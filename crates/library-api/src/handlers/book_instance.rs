//! Book instance (copy) handlers.

use axum::Form;
use axum::extract::{Path, State};
use serde_json::Value;

use library_entity::{Book, BookInstanceStatus};
use library_service::catalog::BookInstanceDetail;
use library_service::{DeleteOutcome, FormOutcome, RawForm};

use crate::error::ApiError;
use crate::extractors::Ctx;
use crate::handlers::PageResult;
use crate::state::AppState;
use crate::view::{View, found, page};

/// Copy view with the book reference replaced by the book itself.
fn populated(detail: &BookInstanceDetail) -> Value {
    let mut view = detail.instance.view();
    if let (Some(fields), Some(book)) = (view.as_object_mut(), detail.book.as_ref()) {
        fields.insert("book".into(), book.view());
    }
    view
}

/// Attach the book and status choices to a form view.
async fn with_options(state: &AppState, view: View) -> Result<View, ApiError> {
    let books = state.instances.form_options().await?;
    let statuses: Vec<&str> = BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect();
    Ok(view
        .with("books", books.iter().map(Book::view).collect::<Vec<_>>())
        .with("statuses", statuses))
}

/// GET /catalog/bookinstances
pub async fn list(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let instances: Vec<Value> = state.instances.list().await?.iter().map(populated).collect();
    let view = View::new("bookinstance/list", "Book instance lists").with("bookinstances", instances);
    page(&state, &ctx, view).await
}

/// GET /catalog/bookinstance/{id}
pub async fn detail(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let detail = state.instances.detail(&id).await?;
    let title = detail
        .book
        .as_ref()
        .map(|book| book.title.clone())
        .unwrap_or_else(|| "Book Instance".to_string());
    let view = View::new("bookinstance/detail", title).with("bookinstance", populated(&detail));
    page(&state, &ctx, view).await
}

/// GET /catalog/bookinstance/create
pub async fn create_form(State(state): State<AppState>, Ctx(ctx): Ctx) -> PageResult {
    let view = with_options(&state, View::new("bookinstance/create", "Create BookInstance")).await?;
    page(&state, &ctx, view).await
}

/// POST /catalog/bookinstance/create
pub async fn create(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.instances.create(RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("bookinstance/create", "Create BookInstance")
                .with("bookinstance", draft)
                .with_errors(&errors);
            let view = with_options(&state, view).await?;
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/bookinstance/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let instance = state.instances.get(&id).await?;
    let view = View::new("bookinstance/update", "Update BookInstance")
        .with("bookinstance", instance.view());
    let view = with_options(&state, view).await?;
    page(&state, &ctx, view).await
}

/// POST /catalog/bookinstance/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
    Form(body): Form<Vec<(String, String)>>,
) -> PageResult {
    match state.instances.update(&id, RawForm::new(body)).await? {
        FormOutcome::Redirect(url) => Ok(found(&url)),
        FormOutcome::Invalid { draft, errors } => {
            let view = View::new("bookinstance/update", "Update BookInstance")
                .with("bookinstance", draft)
                .with_errors(&errors);
            let view = with_options(&state, view).await?;
            page(&state, &ctx, view).await
        }
    }
}

/// GET /catalog/bookinstance/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    let Some(detail) = state.instances.delete_view(&id).await? else {
        return Ok(found("/catalog/bookinstances"));
    };
    let view = View::new("bookinstance/delete", "Delete BookInstance")
        .with("bookinstance", populated(&detail));
    page(&state, &ctx, view).await
}

/// POST /catalog/bookinstance/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(id): Path<String>,
) -> PageResult {
    match state.instances.delete(&id).await? {
        DeleteOutcome::Deleted(url) => Ok(found(&url)),
        DeleteOutcome::Blocked(detail) => {
            let view = View::new("bookinstance/delete", "Delete BookInstance")
                .with("bookinstance", populated(&detail));
            page(&state, &ctx, view).await
        }
    }
}
