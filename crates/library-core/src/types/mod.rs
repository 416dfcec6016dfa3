//! Shared value types: typed identifiers and document filters.

pub mod filter;
pub mod id;

pub use filter::{Condition, Filter};
pub use id::{AuthorId, BookId, BookInstanceId, GenreId, SessionId, UserId};
