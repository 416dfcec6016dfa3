//! # library-service
//!
//! Business logic for the Local Library. Every create/update endpoint runs
//! the same form pipeline (normalize, validate, then persist or re-render);
//! the services here own the entity-specific rules and persistence.
//!
//! Services follow constructor injection: repositories and auth components
//! are handed in at construction time and cloned cheaply per request.

pub mod catalog;
pub mod context;
pub mod form;
pub mod site;
pub mod user;

pub use catalog::{AuthorService, BookInstanceService, BookService, CatalogRepositories, GenreService};
pub use context::RequestContext;
pub use form::{DeleteOutcome, FieldError, FormOutcome, RawForm};
pub use site::SiteService;
pub use user::{AccountService, LoginResult, UserService};

use library_core::error::AppError;
use uuid::Uuid;

/// Parse an id path parameter; anything unparsable is reported as not found.
pub(crate) fn parse_id<I: From<Uuid>>(raw: &str, what: &str) -> Result<I, AppError> {
    Uuid::parse_str(raw)
        .map(I::from)
        .map_err(|_| AppError::not_found(format!("{what} not found")))
}
