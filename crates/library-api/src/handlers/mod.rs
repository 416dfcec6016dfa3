//! HTTP handlers, one module per resource.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod health;
pub mod site;
pub mod user;

use axum::response::Response;

use crate::error::ApiError;

/// Result type shared by every page handler.
pub type PageResult = Result<Response, ApiError>;
