//! Route guards.
//!
//! Guards are pure functions of the resolved principal and the route
//! parameters. They never touch the store and never fail: the only
//! outcomes are "proceed" or "redirect home".

use tracing::debug;

use crate::principal::Principal;
use crate::rbac::{Operation, RbacPolicies};

/// Where denied requests are sent.
pub const HOME: &str = "/";

/// Result of evaluating a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the handler.
    Proceed,
    /// Stop and redirect to the given location.
    Redirect(&'static str),
}

impl GuardDecision {
    /// Whether the handler may run.
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Allow only anonymous requests (login and registration pages).
pub fn anonymous_only(principal: Option<&Principal>) -> GuardDecision {
    match principal {
        Some(p) => {
            debug!(user_id = %p.id, "Authenticated user sent away from anonymous-only page");
            GuardDecision::Redirect(HOME)
        }
        None => GuardDecision::Proceed,
    }
}

/// Allow only the user whose id is the `{id}` path parameter.
pub fn self_or_deny(principal: Option<&Principal>, id_param: &str) -> GuardDecision {
    match principal {
        Some(p) if p.id.to_string() == id_param => GuardDecision::Proceed,
        _ => GuardDecision::Redirect(HOME),
    }
}

/// Allow only principals whose role grants the operation.
pub fn permit(principal: Option<&Principal>, operation: Operation) -> GuardDecision {
    match principal {
        Some(p) if RbacPolicies::has_permission(p.role, operation) => GuardDecision::Proceed,
        Some(p) => {
            debug!(user_id = %p.id, role = %p.role, %operation, "Operation denied");
            GuardDecision::Redirect(HOME)
        }
        None => GuardDecision::Redirect(HOME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_core::types::UserId;
    use library_entity::UserRole;

    fn principal(role: UserRole) -> Principal {
        Principal {
            id: UserId::new(),
            username: "u".to_string(),
            fullname: "U".to_string(),
            email: "u@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_anonymous_only() {
        let p = principal(UserRole::User);
        assert_eq!(anonymous_only(Some(&p)), GuardDecision::Redirect("/"));
        assert_eq!(anonymous_only(None), GuardDecision::Proceed);
    }

    #[test]
    fn test_self_or_deny() {
        let a = principal(UserRole::Admin);
        let b = principal(UserRole::User);
        assert!(self_or_deny(Some(&a), &a.id.to_string()).is_proceed());
        assert_eq!(
            self_or_deny(Some(&a), &b.id.to_string()),
            GuardDecision::Redirect("/")
        );
        assert_eq!(
            self_or_deny(None, &a.id.to_string()),
            GuardDecision::Redirect("/")
        );
        assert!(!self_or_deny(Some(&a), "not-a-uuid").is_proceed());
    }

    #[test]
    fn test_permit() {
        let user = principal(UserRole::User);
        let editor = principal(UserRole::Editor);
        let admin = principal(UserRole::Admin);

        assert!(!permit(Some(&user), Operation::Create).is_proceed());
        assert!(permit(Some(&editor), Operation::Update).is_proceed());
        assert!(!permit(Some(&editor), Operation::Delete).is_proceed());
        assert!(permit(Some(&admin), Operation::Delete).is_proceed());
        assert!(!permit(None, Operation::Read).is_proceed());
    }
}
