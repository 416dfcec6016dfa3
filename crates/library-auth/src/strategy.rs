//! Local username/password authentication.

use tracing::{debug, info};

use library_core::result::AppResult;
use library_core::types::Filter;
use library_database::Repository;
use library_entity::User;

use crate::password::PasswordHasher;

/// Why a login attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No user has that username.
    UnknownUsername,
    /// The password does not match.
    IncorrectPassword,
}

impl RejectReason {
    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownUsername => "Incorrect username.",
            Self::IncorrectPassword => "Incorrect password.",
        }
    }
}

/// Result of an authentication attempt.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Credentials matched.
    Success(User),
    /// Credentials were rejected.
    Rejected(RejectReason),
}

/// Verifies username/password pairs against stored users.
#[derive(Debug, Clone)]
pub struct LocalStrategy {
    users: Repository<User>,
    hasher: PasswordHasher,
}

impl LocalStrategy {
    /// Creates a new strategy.
    pub fn new(users: Repository<User>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Authenticate by exact username match, then password verification.
    ///
    /// Store failures propagate; bad credentials are an `Ok(Rejected)`.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<AuthOutcome> {
        let Some(user) = self
            .users
            .find_one(&Filter::all().eq("username", username))
            .await?
        else {
            debug!(username, "Login rejected: unknown username");
            return Ok(AuthOutcome::Rejected(RejectReason::UnknownUsername));
        };

        if !self.hasher.verify_password(password, &user.password_hash) {
            debug!(user_id = %user.id, "Login rejected: incorrect password");
            return Ok(AuthOutcome::Rejected(RejectReason::IncorrectPassword));
        }

        info!(user_id = %user.id, username = %user.username, "User authenticated");
        Ok(AuthOutcome::Success(user))
    }
}
