//! # library-auth
//!
//! Authentication and authorization for the Local Library.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and the length policy
//! - `session`: cookie-token sessions, flash messages, principal resolution
//! - `strategy`: username/password authentication
//! - `rbac`: the static role/operation table
//! - `guard`: route guards (anonymous-only, self-or-deny, permission)
//! - `principal`: the hash-free identity attached to a request

pub mod guard;
pub mod password;
pub mod principal;
pub mod rbac;
pub mod session;
pub mod strategy;

pub use guard::GuardDecision;
pub use password::{PasswordHasher, PasswordPolicy};
pub use principal::Principal;
pub use rbac::{Operation, RbacPolicies};
pub use session::{IssuedSession, SessionPrincipalResolver, SessionStore};
pub use strategy::{AuthOutcome, LocalStrategy, RejectReason};
