//! Author entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use library_core::traits::Document;
use library_core::types::AuthorId;

use super::format_date;

/// A book author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Unique author identifier.
    pub id: AuthorId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub family_name: String,
    /// Date of birth, if known.
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death, if applicable.
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Full name as `"Family, First"`; empty when either part is missing.
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Human-readable lifespan, e.g. `"Mar 1, 1920 - Apr 6, 1992"`.
    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.as_ref().map(format_date).unwrap_or_default();
        let death = self.date_of_death.as_ref().map(format_date).unwrap_or_default();
        if birth.is_empty() && death.is_empty() {
            String::new()
        } else {
            format!("{birth} - {death}")
        }
    }

    /// Canonical URL of the author detail page.
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Template projection with derived fields.
    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "first_name": self.first_name,
            "family_name": self.family_name,
            "date_of_birth": self.date_of_birth,
            "date_of_death": self.date_of_death,
            "name": self.name(),
            "lifespan": self.lifespan(),
            "url": self.url(),
        })
    }
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn document_id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
