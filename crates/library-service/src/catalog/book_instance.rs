//! Book instance (copy) listing, detail, form and deletion.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;
use serde_json::json;
use tracing::info;
use validator::{Validate, ValidationError};

use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::types::{BookId, BookInstanceId};
use library_entity::{Book, BookInstance, BookInstanceStatus};

use super::CatalogRepositories;
use crate::form::{
    DeleteOutcome, Form, FormErrors, FormOutcome, NormalizedForm, RawForm, Received,
    parse_iso_date,
};
use crate::parse_id;

fn known_status(value: &str) -> Result<(), ValidationError> {
    BookInstanceStatus::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

/// Sanitized book instance form input.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct BookInstanceForm {
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[validate(custom(function = "known_status", message = "Invalid status"))]
    pub status: Option<String>,
    #[validate(custom(function = "crate::form::date::iso_date", message = "Invalid date"))]
    pub due_back: Option<String>,
}

impl Form for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn from_normalized(form: &NormalizedForm) -> Self {
        Self {
            book: form.text("book"),
            imprint: form.text("imprint"),
            status: form.optional("status"),
            due_back: form.optional("due_back"),
        }
    }
}

impl BookInstanceForm {
    fn status(&self) -> BookInstanceStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// A copy together with the book it belongs to.
#[derive(Debug, Clone)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Book instance use cases.
#[derive(Debug, Clone)]
pub struct BookInstanceService {
    repos: CatalogRepositories,
}

impl BookInstanceService {
    /// Creates a new book instance service.
    pub fn new(repos: CatalogRepositories) -> Self {
        Self { repos }
    }

    /// All copies, each with its book.
    pub async fn list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let (instances, books) = futures::try_join!(
            self.repos.instances.find_all(),
            self.repos.books.find_all()
        )?;
        let books: HashMap<BookId, Book> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceDetail {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    /// Look a copy up by path id.
    pub async fn get(&self, id: &str) -> AppResult<BookInstance> {
        let id: BookInstanceId = parse_id(id, "Book copy")?;
        self.repos
            .instances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book copy not found"))
    }

    /// A copy with its book.
    pub async fn detail(&self, id: &str) -> AppResult<BookInstanceDetail> {
        let instance = self.get(id).await?;
        let book = self.repos.books.find_by_id(instance.book).await?;
        Ok(BookInstanceDetail { instance, book })
    }

    /// Books offered by the copy form, ordered by title.
    pub async fn form_options(&self) -> AppResult<Vec<Book>> {
        let mut books = self.repos.books.find_all().await?;
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn check(
        &self,
        form: &BookInstanceForm,
        mut errors: FormErrors,
    ) -> AppResult<(FormErrors, Option<BookId>)> {
        let mut book = None;
        if !form.book.is_empty() {
            book = match parse_id::<BookId>(&form.book, "Book") {
                Ok(id) => self.repos.books.find_by_id(id).await?.map(|b| b.id),
                Err(_) => None,
            };
            if book.is_none() {
                errors.add_async("book", "Book not found");
            }
        }
        let book = if errors.is_empty() { book } else { None };
        Ok((errors, book))
    }

    /// Validate and create a copy.
    pub async fn create(&self, raw: RawForm) -> AppResult<FormOutcome<BookInstanceForm>> {
        let Received { form, errors, .. } = BookInstanceForm::receive(raw);
        let (errors, book) = self.check(&form, errors).await?;
        let Some(book) = book else {
            return Ok(FormOutcome::invalid(form, errors));
        };

        let instance = BookInstance {
            id: BookInstanceId::new(),
            book,
            status: form.status(),
            due_back: form.due_back.as_deref().and_then(parse_iso_date),
            imprint: form.imprint,
        };
        self.repos.instances.save(&instance).await?;
        info!(instance_id = %instance.id, "Book copy created");
        Ok(FormOutcome::Redirect(instance.url()))
    }

    /// Validate and update an existing copy, keeping its id.
    pub async fn update(&self, id: &str, raw: RawForm) -> AppResult<FormOutcome<BookInstanceForm>> {
        let instance = self.get(id).await?;
        let Received { form, errors, .. } = BookInstanceForm::receive(raw);
        let (errors, book) = self.check(&form, errors).await?;
        let Some(book) = book else {
            return Ok(FormOutcome::invalid(form, errors));
        };

        let patch = json!({
            "book": book,
            "imprint": form.imprint,
            "status": form.status(),
            "due_back": form.due_back.as_deref().and_then(parse_iso_date),
        });
        self.repos.instances.update(instance.id, patch).await?;
        info!(instance_id = %instance.id, "Book copy updated");
        Ok(FormOutcome::Redirect(instance.url()))
    }

    /// Data for the delete confirmation page. `None` if the copy is gone.
    pub async fn delete_view(&self, id: &str) -> AppResult<Option<BookInstanceDetail>> {
        let id: BookInstanceId = parse_id(id, "Book copy")?;
        let Some(instance) = self.repos.instances.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.repos.books.find_by_id(instance.book).await?;
        Ok(Some(BookInstanceDetail { instance, book }))
    }

    /// Delete a copy. Nothing depends on copies, so this never blocks.
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<BookInstanceDetail>> {
        let id: BookInstanceId = parse_id(id, "Book copy")?;
        self.repos.instances.remove(id).await?;
        info!(instance_id = %id, "Book copy deleted");
        Ok(DeleteOutcome::Deleted("/catalog/bookinstances".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::repos;
    use library_core::types::AuthorId;

    async fn seed_book(repos: &CatalogRepositories) -> Book {
        let book = Book {
            id: BookId::new(),
            title: "Emma".to_string(),
            author: AuthorId::new(),
            summary: "Matchmaking".to_string(),
            isbn: "1".to_string(),
            genre: Vec::new(),
        };
        repos.books.save(&book).await.unwrap();
        book
    }

    #[tokio::test]
    async fn test_create_defaults_to_maintenance() {
        let repos = repos();
        let book = seed_book(&repos).await;
        let service = BookInstanceService::new(repos);
        let book_id = book.id.to_string();

        let raw = RawForm::from([("book", book_id.as_str()), ("imprint", "Penguin, 2003")]);
        let FormOutcome::Redirect(url) = service.create(raw).await.unwrap() else {
            panic!("expected redirect");
        };
        let copies = service.list().await.unwrap();
        assert_eq!(url, copies[0].instance.url());
        assert_eq!(copies[0].instance.status, BookInstanceStatus::Maintenance);
        assert_eq!(copies[0].instance.imprint, "Penguin, 2003");
        assert_eq!(copies[0].book.as_ref().map(|b| b.id), Some(book.id));
    }

    #[tokio::test]
    async fn test_invalid_status_and_date() {
        let repos = repos();
        let book = seed_book(&repos).await;
        let service = BookInstanceService::new(repos);
        let book_id = book.id.to_string();

        let raw = RawForm::from([
            ("book", book_id.as_str()),
            ("imprint", "Penguin"),
            ("status", "Lost"),
            ("due_back", "soon"),
        ]);
        let FormOutcome::Invalid { errors, .. } = service.create(raw).await.unwrap() else {
            panic!("expected invalid");
        };
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["Invalid status", "Invalid date"]);
    }

    #[tokio::test]
    async fn test_delete_never_blocks() {
        let repos = repos();
        let book = seed_book(&repos).await;
        let service = BookInstanceService::new(repos);
        let book_id = book.id.to_string();
        service
            .create(RawForm::from([("book", book_id.as_str()), ("imprint", "x")]))
            .await
            .unwrap();
        let copy = service.list().await.unwrap().remove(0).instance;

        let outcome = service.delete(&copy.id.to_string()).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
        assert!(service.list().await.unwrap().is_empty());
    }
}
