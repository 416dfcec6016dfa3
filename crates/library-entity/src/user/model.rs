//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use library_core::traits::Document;
use library_core::types::UserId;

use super::role::UserRole;

/// A registered library user.
///
/// The stored document carries the password hash; presentation code must
/// go through a hash-free projection instead of serializing this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Full display name.
    pub fullname: String,
    /// Email address.
    pub email: String,
    /// Access role.
    #[serde(default)]
    pub role: UserRole,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the profile was last changed.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Canonical URL of the user's profile page.
    pub fn url(&self) -> String {
        format!("/user/{}", self.id)
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn document_id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
