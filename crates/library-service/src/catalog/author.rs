//! Author listing, detail, form and deletion.

use serde::Serialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::types::{AuthorId, Filter};
use library_entity::{Author, Book};

use super::CatalogRepositories;
use crate::form::{
    DeleteOutcome, Form, FormOutcome, NormalizedForm, RawForm, Received, parse_iso_date,
};
use crate::parse_id;

/// Sanitized author form input.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct AuthorForm {
    #[validate(length(min = 1, message = "First name must be specified."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Family name must be specified."))]
    pub family_name: String,
    #[validate(custom(function = "crate::form::date::iso_date", message = "Invalid date of birth"))]
    pub date_of_birth: Option<String>,
    #[validate(custom(function = "crate::form::date::iso_date", message = "Invalid date of death"))]
    pub date_of_death: Option<String>,
}

impl Form for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn from_normalized(form: &NormalizedForm) -> Self {
        Self {
            first_name: form.text("firstName"),
            family_name: form.text("lastName"),
            date_of_birth: form.optional("dob"),
            date_of_death: form.optional("dod"),
        }
    }
}

/// An author together with their books.
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

/// Author use cases.
#[derive(Debug, Clone)]
pub struct AuthorService {
    repos: CatalogRepositories,
}

impl AuthorService {
    /// Creates a new author service.
    pub fn new(repos: CatalogRepositories) -> Self {
        Self { repos }
    }

    /// All authors ordered by family name.
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.repos.authors.find_all().await?;
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    /// Look an author up by path id.
    pub async fn get(&self, id: &str) -> AppResult<Author> {
        let id: AuthorId = parse_id(id, "Author")?;
        self.repos
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Author not found"))
    }

    async fn load(&self, id: AuthorId) -> AppResult<(Option<Author>, Vec<Book>)> {
        let by_author = Filter::all().eq("author", id);
        futures::try_join!(
            self.repos.authors.find_by_id(id),
            self.repos.books.find(&by_author)
        )
    }

    /// An author and their books, fetched concurrently.
    pub async fn detail(&self, id: &str) -> AppResult<AuthorDetail> {
        let id: AuthorId = parse_id(id, "Author")?;
        match self.load(id).await? {
            (Some(author), books) => Ok(AuthorDetail { author, books }),
            (None, _) => Err(AppError::not_found("Author not found")),
        }
    }

    /// Validate and create an author.
    pub async fn create(&self, raw: RawForm) -> AppResult<FormOutcome<AuthorForm>> {
        let Received { form, errors, .. } = AuthorForm::receive(raw);
        if !errors.is_empty() {
            return Ok(FormOutcome::invalid(form, errors));
        }

        let author = Author {
            id: AuthorId::new(),
            first_name: form.first_name,
            family_name: form.family_name,
            date_of_birth: form.date_of_birth.as_deref().and_then(parse_iso_date),
            date_of_death: form.date_of_death.as_deref().and_then(parse_iso_date),
        };
        self.repos.authors.save(&author).await?;
        info!(author_id = %author.id, "Author created");
        Ok(FormOutcome::Redirect(author.url()))
    }

    /// Validate and update an existing author, keeping its id.
    pub async fn update(&self, id: &str, raw: RawForm) -> AppResult<FormOutcome<AuthorForm>> {
        let author = self.get(id).await?;
        let Received { form, errors, .. } = AuthorForm::receive(raw);
        if !errors.is_empty() {
            return Ok(FormOutcome::invalid(form, errors));
        }

        let patch = json!({
            "first_name": form.first_name,
            "family_name": form.family_name,
            "date_of_birth": form.date_of_birth.as_deref().and_then(parse_iso_date),
            "date_of_death": form.date_of_death.as_deref().and_then(parse_iso_date),
        });
        self.repos.authors.update(author.id, patch).await?;
        info!(author_id = %author.id, "Author updated");
        Ok(FormOutcome::Redirect(author.url()))
    }

    /// Data for the delete confirmation page. `None` if the author is gone.
    pub async fn delete_view(&self, id: &str) -> AppResult<Option<AuthorDetail>> {
        let id: AuthorId = parse_id(id, "Author")?;
        let (author, books) = self.load(id).await?;
        Ok(author.map(|author| AuthorDetail { author, books }))
    }

    /// Delete an author unless books still reference them.
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<AuthorDetail>> {
        let id: AuthorId = parse_id(id, "Author")?;
        let (author, books) = self.load(id).await?;
        if let Some(author) = author {
            if !books.is_empty() {
                info!(author_id = %id, books = books.len(), "Author delete blocked by books");
                return Ok(DeleteOutcome::Blocked(AuthorDetail { author, books }));
            }
        }
        self.repos.authors.remove(id).await?;
        info!(author_id = %id, "Author deleted");
        Ok(DeleteOutcome::Deleted("/catalog/authors".to_string()))
    }
}
