//! Book instance (physical copy) entity and its circulation status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use library_core::AppError;
use library_core::traits::Document;
use library_core::types::{BookId, BookInstanceId};

use super::format_date;

/// Circulation status of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    /// On the shelf.
    Available,
    /// Being repaired or processed.
    #[default]
    Maintenance,
    /// Checked out.
    Loaned,
    /// Held for a patron.
    Reserved,
}

impl BookInstanceStatus {
    /// All statuses in display order.
    pub const ALL: [BookInstanceStatus; 4] = [
        Self::Available,
        Self::Maintenance,
        Self::Loaned,
        Self::Reserved,
    ];

    /// Return the status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Maintenance => "Maintenance",
            Self::Loaned => "Loaned",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid status: '{s}'")))
    }
}

/// A physical copy of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    /// Unique copy identifier.
    pub id: BookInstanceId,
    /// The book this is a copy of.
    pub book: BookId,
    /// Publisher/edition imprint.
    pub imprint: String,
    /// Circulation status.
    #[serde(default)]
    pub status: BookInstanceStatus,
    /// Date the copy is due back, when loaned.
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Canonical URL of the copy detail page.
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// Template projection with derived fields.
    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "book": self.book,
            "imprint": self.imprint,
            "status": self.status,
            "due_back": self.due_back,
            "due_back_formatted": self.due_back.as_ref().map(format_date),
            "url": self.url(),
        })
    }
}

impl Document for BookInstance {
    const COLLECTION: &'static str = "bookinstances";

    fn document_id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
