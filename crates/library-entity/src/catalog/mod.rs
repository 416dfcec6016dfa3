//! Catalog entities: authors, books, genres and physical copies.
//!
//! Each entity exposes its canonical URL and a `view()` projection that adds
//! the derived fields templates need (display name, formatted dates, URL).

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

pub use author::Author;
pub use book::Book;
pub use book_instance::{BookInstance, BookInstanceStatus};
pub use genre::Genre;

use chrono::NaiveDate;

/// Format a date the way catalog pages display it, e.g. `Jun 5, 1965`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
