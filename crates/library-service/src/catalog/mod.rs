//! Catalog services: authors, books, genres and book instances.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use std::sync::Arc;

use library_core::traits::DocumentStore;
use library_database::Repository;
use library_entity::{Author, Book, BookInstance, Genre};

pub use author::{AuthorDetail, AuthorForm, AuthorService};
pub use book::{BookDetail, BookForm, BookListing, BookService};
pub use book_instance::{BookInstanceDetail, BookInstanceForm, BookInstanceService};
pub use genre::{GenreDetail, GenreForm, GenreService};

/// Repositories for every catalog collection over one shared store.
#[derive(Debug, Clone)]
pub struct CatalogRepositories {
    /// Authors.
    pub authors: Repository<Author>,
    /// Books.
    pub books: Repository<Book>,
    /// Genres.
    pub genres: Repository<Genre>,
    /// Book instances.
    pub instances: Repository<BookInstance>,
}

impl CatalogRepositories {
    /// Create repositories over a shared store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            authors: Repository::new(Arc::clone(&store)),
            books: Repository::new(Arc::clone(&store)),
            genres: Repository::new(Arc::clone(&store)),
            instances: Repository::new(store),
        }
    }
}
