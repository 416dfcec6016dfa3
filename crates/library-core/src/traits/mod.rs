//! Core traits defined in `library-core` and implemented by other crates.

pub mod store;

pub use store::{Document, DocumentStore};
