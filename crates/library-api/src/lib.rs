//! # library-api
//!
//! HTTP layer for the Local Library: routing, the session and guard
//! middleware, handlers, and the boundary where view models are handed to a
//! renderer.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod view;

pub use app::{build_app, run_server};
pub use state::AppState;
pub use view::{JsonRenderer, Renderer, View};
