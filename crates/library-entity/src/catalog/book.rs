//! Book entity.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use library_core::traits::Document;
use library_core::types::{AuthorId, BookId, GenreId};

/// A catalogued title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique book identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author reference.
    pub author: AuthorId,
    /// Short summary.
    pub summary: String,
    /// ISBN as entered.
    pub isbn: String,
    /// Genre references.
    #[serde(default)]
    pub genre: Vec<GenreId>,
}

impl Book {
    /// Canonical URL of the book detail page.
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    /// Template projection with derived fields.
    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "author": self.author,
            "summary": self.summary,
            "isbn": self.isbn,
            "genre": self.genre,
            "url": self.url(),
        })
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn document_id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
