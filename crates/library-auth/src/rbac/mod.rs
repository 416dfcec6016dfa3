//! Role-based access control: the static role/operation table.

pub mod policies;

pub use policies::{Operation, RbacPolicies, RolePolicy};
