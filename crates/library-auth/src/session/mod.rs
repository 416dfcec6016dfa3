//! Cookie-token sessions and principal resolution.

pub mod resolver;
pub mod store;

pub use resolver::SessionPrincipalResolver;
pub use store::{IssuedSession, SessionStore};
