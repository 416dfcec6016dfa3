//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use library_core::AppError;

/// Roles available to library users, ordered by privilege.
///
/// Persisted as its numeric value (`User=0`, `Editor=1`, `Admin=2`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum UserRole {
    /// Regular user: read-only access.
    #[default]
    User = 0,
    /// Editor: read, create and update access.
    Editor = 1,
    /// Admin: full access.
    Admin = 2,
}

impl UserRole {
    /// All roles in ascending privilege order.
    pub const ALL: [UserRole; 3] = [Self::User, Self::Editor, Self::Admin];

    /// Numeric value of the role.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role's display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<UserRole> for u8 {
    fn from(role: UserRole) -> Self {
        role.value()
    }
}

impl TryFrom<u8> for UserRole {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::User),
            1 => Ok(Self::Editor),
            2 => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid user role value: {value}. Expected 0, 1 or 2"
            ))),
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    /// Accepts either the numeric value or the case-insensitive name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = s.parse::<u8>() {
            return Self::try_from(value);
        }
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, editor, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin > UserRole::Editor);
        assert!(UserRole::Editor > UserRole::User);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("1".parse::<UserRole>().unwrap(), UserRole::Editor);
        assert!("3".parse::<UserRole>().is_err());
        assert!("librarian".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serialized_as_number() {
        assert_eq!(serde_json::to_string(&UserRole::Editor).unwrap(), "1");
        let role: UserRole = serde_json::from_str("2").unwrap();
        assert_eq!(role, UserRole::Admin);
        assert!(serde_json::from_str::<UserRole>("7").is_err());
    }
}
