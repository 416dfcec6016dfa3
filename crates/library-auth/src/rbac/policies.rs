//! Role-to-operation mapping definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use library_entity::UserRole;

/// An operation on catalog entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// View entities.
    Read,
    /// Create entities.
    Create,
    /// Update entities.
    Update,
    /// Delete entities.
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One row of the role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    /// The role.
    pub role: UserRole,
    /// Operations the role may perform.
    pub operations: &'static [Operation],
}

const ROLE_TABLE: [RolePolicy; 3] = [
    RolePolicy {
        role: UserRole::User,
        operations: &[Operation::Read],
    },
    RolePolicy {
        role: UserRole::Editor,
        operations: &[Operation::Read, Operation::Create, Operation::Update],
    },
    RolePolicy {
        role: UserRole::Admin,
        operations: &[
            Operation::Read,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
        ],
    },
];

/// The single source of truth for what each role may do.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacPolicies;

impl RbacPolicies {
    /// Returns the whole role table in ascending privilege order.
    pub fn table() -> &'static [RolePolicy] {
        &ROLE_TABLE
    }

    /// Returns the operations granted to a role.
    pub fn operations(role: UserRole) -> &'static [Operation] {
        ROLE_TABLE
            .iter()
            .find(|policy| policy.role == role)
            .map(|policy| policy.operations)
            .unwrap_or(&[])
    }

    /// Checks whether the role may perform the operation.
    pub fn has_permission(role: UserRole, operation: Operation) -> bool {
        Self::operations(role).contains(&operation)
    }
}
