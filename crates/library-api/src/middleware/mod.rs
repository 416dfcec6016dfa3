//! Axum middleware stack.

pub mod error;
pub mod guard;
pub mod logging;
pub mod session;
