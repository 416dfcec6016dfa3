//! Book listing, detail, form and deletion.

use std::collections::HashMap;

use futures::future::try_join_all;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::types::{AuthorId, BookId, Filter, GenreId};
use library_entity::{Author, Book, BookInstance, Genre};

use super::CatalogRepositories;
use crate::form::{
    DeleteOutcome, Form, FormErrors, FormOutcome, NormalizedForm, RawForm, Received,
};
use crate::parse_id;

/// Sanitized book form input. References stay as submitted strings so an
/// invalid submission can be re-rendered verbatim.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    /// Selected genre ids; zero, one or many.
    pub genre: Vec<String>,
}

impl Form for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn from_normalized(form: &NormalizedForm) -> Self {
        Self {
            title: form.text("title"),
            author: form.text("author"),
            summary: form.text("summary"),
            isbn: form.text("isbn"),
            genre: form.multi("genre"),
        }
    }
}

/// A book row on the list page.
#[derive(Debug, Clone)]
pub struct BookListing {
    pub book: Book,
    pub author: Option<Author>,
}

/// A book with its author, genres and copies.
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Book use cases.
#[derive(Debug, Clone)]
pub struct BookService {
    repos: CatalogRepositories,
}

impl BookService {
    /// Creates a new book service.
    pub fn new(repos: CatalogRepositories) -> Self {
        Self { repos }
    }

    /// All books ordered by title, each with its author.
    pub async fn list(&self) -> AppResult<Vec<BookListing>> {
        let (books, authors) = futures::try_join!(
            self.repos.books.find_all(),
            self.repos.authors.find_all()
        )?;
        let authors: HashMap<AuthorId, Author> =
            authors.into_iter().map(|a| (a.id, a)).collect();

        let mut listing: Vec<BookListing> = books
            .into_iter()
            .map(|book| BookListing {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect();
        listing.sort_by(|a, b| a.book.title.cmp(&b.book.title));
        Ok(listing)
    }

    /// Look a book up by path id.
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        let id: BookId = parse_id(id, "Book")?;
        self.repos
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    /// A book with its author, genres and copies.
    pub async fn detail(&self, id: &str) -> AppResult<BookDetail> {
        let id: BookId = parse_id(id, "Book")?;
        let by_book = Filter::all().eq("book", id);
        let (book, instances) = futures::try_join!(
            self.repos.books.find_by_id(id),
            self.repos.instances.find(&by_book)
        )?;
        let book = book.ok_or_else(|| AppError::not_found("Book not found"))?;

        let (author, genres) = futures::try_join!(
            self.repos.authors.find_by_id(book.author),
            try_join_all(book.genre.iter().map(|g| self.repos.genres.find_by_id(*g)))
        )?;
        Ok(BookDetail {
            author,
            genres: genres.into_iter().flatten().collect(),
            instances,
            book,
        })
    }

    /// Authors and genres offered by the book form.
    pub async fn form_options(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        let (mut authors, mut genres) = futures::try_join!(
            self.repos.authors.find_all(),
            self.repos.genres.find_all()
        )?;
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok((authors, genres))
    }

    /// Run every rule, including the reference checks against the store.
    async fn check(
        &self,
        form: &BookForm,
        mut errors: FormErrors,
    ) -> AppResult<(FormErrors, Option<(AuthorId, Vec<GenreId>)>)> {

        let mut author = None;
        if !form.author.is_empty() {
            author = match parse_id::<AuthorId>(&form.author, "Author") {
                Ok(id) => self.repos.authors.find_by_id(id).await?.map(|a| a.id),
                Err(_) => None,
            };
            if author.is_none() {
                errors.add_async("author", "Author not found");
            }
        }

        let mut genres = Vec::with_capacity(form.genre.len());
        for raw in &form.genre {
            let found = match parse_id::<GenreId>(raw, "Genre") {
                Ok(id) => self.repos.genres.find_by_id(id).await?.map(|g| g.id),
                Err(_) => None,
            };
            match found {
                Some(id) => genres.push(id),
                None => errors.add_async("genre", "Genre not found"),
            }
        }

        let resolved = match (errors.is_empty(), author) {
            (true, Some(author)) => Some((author, genres)),
            _ => None,
        };
        Ok((errors, resolved))
    }

    /// Validate and create a book.
    pub async fn create(&self, raw: RawForm) -> AppResult<FormOutcome<BookForm>> {
        let Received { form, errors, .. } = BookForm::receive(raw);
        let (errors, resolved) = self.check(&form, errors).await?;
        let Some((author, genre)) = resolved else {
            return Ok(FormOutcome::invalid(form, errors));
        };

        let book = Book {
            id: BookId::new(),
            title: form.title,
            author,
            summary: form.summary,
            isbn: form.isbn,
            genre,
        };
        self.repos.books.save(&book).await?;
        info!(book_id = %book.id, "Book created");
        Ok(FormOutcome::Redirect(book.url()))
    }

    /// Validate and update an existing book, keeping its id.
    pub async fn update(&self, id: &str, raw: RawForm) -> AppResult<FormOutcome<BookForm>> {
        let book = self.get(id).await?;
        let Received { form, errors, .. } = BookForm::receive(raw);
        let (errors, resolved) = self.check(&form, errors).await?;
        let Some((author, genre)) = resolved else {
            return Ok(FormOutcome::invalid(form, errors));
        };

        let patch = json!({
            "title": form.title,
            "author": author,
            "summary": form.summary,
            "isbn": form.isbn,
            "genre": genre,
        });
        self.repos.books.update(book.id, patch).await?;
        info!(book_id = %book.id, "Book updated");
        Ok(FormOutcome::Redirect(book.url()))
    }

    async fn load(&self, id: BookId) -> AppResult<(Option<Book>, Vec<BookInstance>)> {
        let by_book = Filter::all().eq("book", id);
        futures::try_join!(
            self.repos.books.find_by_id(id),
            self.repos.instances.find(&by_book)
        )
    }

    /// Data for the delete confirmation page. `None` if the book is gone.
    pub async fn delete_view(&self, id: &str) -> AppResult<Option<(Book, Vec<BookInstance>)>> {
        let id: BookId = parse_id(id, "Book")?;
        let (book, instances) = self.load(id).await?;
        Ok(book.map(|book| (book, instances)))
    }

    /// Delete a book unless copies of it still exist.
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<(Book, Vec<BookInstance>)>> {
        let id: BookId = parse_id(id, "Book")?;
        let (book, instances) = self.load(id).await?;
        if let Some(book) = book {
            if !instances.is_empty() {
                info!(book_id = %id, copies = instances.len(), "Book delete blocked by copies");
                return Ok(DeleteOutcome::Blocked((book, instances)));
            }
        }
        self.repos.books.remove(id).await?;
        info!(book_id = %id, "Book deleted");
        Ok(DeleteOutcome::Deleted("/catalog/books".to_string()))
    }
}
