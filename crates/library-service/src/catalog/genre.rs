//! Genre listing, detail, form and deletion.

use serde::Serialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::types::{Filter, GenreId};
use library_entity::{Book, Genre};

use super::CatalogRepositories;
use crate::form::{DeleteOutcome, Form, FormOutcome, NormalizedForm, RawForm, Received};
use crate::parse_id;

/// Sanitized genre form input.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GenreForm {
    #[validate(length(min = 3, message = "Genre name at least 3 characters"))]
    pub name: String,
}

impl Form for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn from_normalized(form: &NormalizedForm) -> Self {
        Self {
            name: form.text("name"),
        }
    }
}

/// A genre and the books filed under it.
#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Genre use cases.
#[derive(Debug, Clone)]
pub struct GenreService {
    repos: CatalogRepositories,
}

impl GenreService {
    /// Creates a new genre service.
    pub fn new(repos: CatalogRepositories) -> Self {
        Self { repos }
    }

    /// All genres ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let mut genres = self.repos.genres.find_all().await?;
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    /// Look a genre up by path id.
    pub async fn get(&self, id: &str) -> AppResult<Genre> {
        let id: GenreId = parse_id(id, "Genre")?;
        self.repos
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Genre not found"))
    }

    async fn load(&self, id: GenreId) -> AppResult<(Option<Genre>, Vec<Book>)> {
        let in_genre = Filter::all().contains("genre", id);
        futures::try_join!(
            self.repos.genres.find_by_id(id),
            self.repos.books.find(&in_genre)
        )
    }

    /// A genre and its books, fetched concurrently.
    pub async fn detail(&self, id: &str) -> AppResult<GenreDetail> {
        let id: GenreId = parse_id(id, "Genre")?;
        match self.load(id).await? {
            (Some(genre), books) => Ok(GenreDetail { genre, books }),
            (None, _) => Err(AppError::not_found("Genre not found")),
        }
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.repos
            .genres
            .find_one(&Filter::all().eq("name", name))
            .await
    }

    /// Validate and create a genre. A genre with the same name is reused.
    pub async fn create(&self, raw: RawForm) -> AppResult<FormOutcome<GenreForm>> {
        let Received { form, errors, .. } = GenreForm::receive(raw);
        if !errors.is_empty() {
            return Ok(FormOutcome::invalid(form, errors));
        }

        if let Some(existing) = self.find_by_name(&form.name).await? {
            info!(genre_id = %existing.id, "Genre already exists; redirecting");
            return Ok(FormOutcome::Redirect(existing.url()));
        }

        let genre = Genre {
            id: GenreId::new(),
            name: form.name,
        };
        self.repos.genres.save(&genre).await?;
        info!(genre_id = %genre.id, "Genre created");
        Ok(FormOutcome::Redirect(genre.url()))
    }

    /// Validate and rename an existing genre, keeping its id.
    pub async fn update(&self, id: &str, raw: RawForm) -> AppResult<FormOutcome<GenreForm>> {
        let genre = self.get(id).await?;
        let Received {
            form, mut errors, ..
        } = GenreForm::receive(raw);
        if errors.is_empty() {
            if let Some(other) = self.find_by_name(&form.name).await? {
                if other.id != genre.id {
                    errors.add_async("name", "Genre name already exists");
                }
            }
        }
        if !errors.is_empty() {
            return Ok(FormOutcome::invalid(form, errors));
        }

        self.repos
            .genres
            .update(genre.id, json!({ "name": form.name }))
            .await?;
        info!(genre_id = %genre.id, "Genre updated");
        Ok(FormOutcome::Redirect(genre.url()))
    }

    /// Data for the delete confirmation page. `None` if the genre is gone.
    pub async fn delete_view(&self, id: &str) -> AppResult<Option<GenreDetail>> {
        let id: GenreId = parse_id(id, "Genre")?;
        let (genre, books) = self.load(id).await?;
        Ok(genre.map(|genre| GenreDetail { genre, books }))
    }

    /// Delete a genre unless books are filed under it.
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<GenreDetail>> {
        let id: GenreId = parse_id(id, "Genre")?;
        let (genre, books) = self.load(id).await?;
        if let Some(genre) = genre {
            if !books.is_empty() {
                info!(genre_id = %id, books = books.len(), "Genre delete blocked by books");
                return Ok(DeleteOutcome::Blocked(GenreDetail { genre, books }));
            }
        }
        self.repos.genres.remove(id).await?;
        info!(genre_id = %id, "Genre deleted");
        Ok(DeleteOutcome::Deleted("/catalog/genres".to_string()))
    }
}
