//! Request context carrying the session and the resolved principal.

use chrono::{DateTime, Utc};

use library_auth::Principal;
use library_core::types::SessionId;

/// Context for the current request.
///
/// Built once by the session middleware and passed explicitly into guards,
/// handlers and service methods so that every operation knows who is acting
/// and from which session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The current session ID.
    pub session_id: SessionId,
    /// The authenticated principal, if any.
    pub principal: Option<Principal>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(session_id: SessionId, principal: Option<Principal>) -> Self {
        Self {
            session_id,
            principal,
            request_time: Utc::now(),
        }
    }

    /// Returns the principal, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns whether a principal is attached.
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.principal.as_ref().is_some_and(|p| p.role.is_admin())
    }
}
