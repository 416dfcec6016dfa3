//! Genre entity.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use library_core::traits::Document;
use library_core::types::GenreId;

/// A book genre. Names are unique by exact match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    /// Unique genre identifier.
    pub id: GenreId,
    /// Genre name.
    pub name: String,
}

impl Genre {
    /// Canonical URL of the genre detail page.
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    /// Template projection with derived fields.
    pub fn view(&self) -> Value {
        json!({ "id": self.id, "name": self.name, "url": self.url() })
    }
}

impl Document for Genre {
    const COLLECTION: &'static str = "genres";

    fn document_id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
