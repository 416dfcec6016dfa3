//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use library_core::traits::Document;
use library_core::types::{SessionId, UserId};

use super::flash::FlashMessage;

/// A server-side session record.
///
/// The client holds an opaque random token; only its SHA-256 hash is
/// stored. A session without a `user_id` is anonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// SHA-256 hash of the cookie token.
    pub token_hash: String,
    /// The authenticated principal, set only by login.
    pub user_id: Option<UserId>,
    /// Pending read-once messages.
    #[serde(default)]
    pub flash: Vec<FlashMessage>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// End of the current TTL window.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the TTL window has elapsed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check whether a principal is attached.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

impl Document for Session {
    const COLLECTION: &'static str = "sessions";

    fn document_id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
