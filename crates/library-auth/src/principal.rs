//! The authenticated identity attached to a request.

use serde::Serialize;

use library_core::types::UserId;
use library_entity::{User, UserRole};

/// A user as seen by guards, handlers and views.
///
/// Built from a [`User`] record but without the password hash, so it can be
/// handed to the presentation layer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// User id.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub fullname: String,
    /// Email address.
    pub email: String,
    /// Access role.
    pub role: UserRole,
}

impl Principal {
    /// Canonical URL of the user's profile page.
    pub fn url(&self) -> String {
        format!("/user/{}", self.id)
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            email: user.email,
            role: user.role,
        }
    }
}
