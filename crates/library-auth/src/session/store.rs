//! Session storage operations over the session document collection.
//!
//! The cookie carries a random token; the store only ever sees its SHA-256
//! hash. Expiry is checked when a session is read, and every write pushes
//! the expiry out by one TTL window.

use chrono::{Duration, Utc};
use rand::Rng;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use library_core::config::SessionConfig;
use library_core::error::AppError;
use library_core::result::AppResult;
use library_core::types::{Filter, SessionId, UserId};
use library_database::Repository;
use library_entity::{FlashMessage, Session};

/// A freshly created session and the raw token to hand to the client.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Raw cookie token. Never stored.
    pub token: String,
    /// The stored session record.
    pub session: Session,
}

/// Session persistence operations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session repository.
    sessions: Repository<Session>,
    /// Length of the TTL window.
    ttl: Duration,
}

impl SessionStore {
    /// Creates a new session store.
    ///
    /// Fails when the configured TTL does not fit a time delta.
    pub fn new(sessions: Repository<Session>, config: &SessionConfig) -> AppResult<Self> {
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "session.ttl_seconds out of range: {}",
                    config.ttl_seconds
                ))
            })?;
        Ok(Self { sessions, ttl })
    }

    /// Creates a new anonymous session.
    pub async fn create(&self) -> AppResult<IssuedSession> {
        let token = generate_token();
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            token_hash: hash_token(&token),
            user_id: None,
            flash: Vec::new(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.save(&session).await?;
        debug!(session_id = %session.id, "Created anonymous session");
        Ok(IssuedSession { token, session })
    }

    /// Loads the live session for a cookie token.
    ///
    /// Unknown tokens resolve to `None`; expired sessions are deleted and
    /// also resolve to `None`.
    pub async fn load(&self, token: &str) -> AppResult<Option<Session>> {
        let Some(session) = self
            .sessions
            .find_one(&Filter::all().eq("token_hash", hash_token(token)))
            .await?
        else {
            return Ok(None);
        };

        if session.is_expired() {
            debug!(session_id = %session.id, "Discarding expired session");
            self.sessions.remove(session.id).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Attaches a principal to the session and rotates its token.
    ///
    /// Returns the new raw token; the previous one stops resolving.
    pub async fn authenticate(&self, session_id: SessionId, user_id: UserId) -> AppResult<String> {
        let token = generate_token();
        self.sessions
            .update(
                session_id,
                json!({
                    "token_hash": hash_token(&token),
                    "user_id": user_id,
                    "expires_at": Utc::now() + self.ttl,
                }),
            )
            .await?;
        info!(%session_id, %user_id, "Principal attached to session");
        Ok(token)
    }

    /// Queues a flash message for the next rendered page.
    pub async fn push_flash(&self, session_id: SessionId, message: FlashMessage) -> AppResult<()> {
        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Ok(());
        };
        let mut flash = session.flash;
        flash.push(message);
        self.sessions
            .update(
                session_id,
                json!({ "flash": flash, "expires_at": Utc::now() + self.ttl }),
            )
            .await
    }

    /// Drains the flash queue. Each message is returned exactly once.
    pub async fn take_flash(&self, session_id: SessionId) -> AppResult<Vec<FlashMessage>> {
        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Ok(Vec::new());
        };
        if session.flash.is_empty() {
            return Ok(Vec::new());
        }
        self.sessions
            .update(
                session_id,
                json!({ "flash": [], "expires_at": Utc::now() + self.ttl }),
            )
            .await?;
        Ok(session.flash)
    }

    /// Destroys the session (logout).
    pub async fn destroy(&self, session_id: SessionId) -> AppResult<()> {
        self.sessions.remove(session_id).await?;
        info!(%session_id, "Session destroyed");
        Ok(())
    }
}

/// Generates a random 256-bit token as lowercase hex.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.r#gen();
    hex::encode(bytes)
}

/// Computes the SHA-256 hash of a token as lowercase hex.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
