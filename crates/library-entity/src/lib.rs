//! # library-entity
//!
//! Domain entities for the Local Library: users and roles, the catalog
//! (authors, books, genres, book instances), and session records.
//!
//! Every persisted entity implements [`library_core::traits::Document`].

pub mod catalog;
pub mod session;
pub mod user;

pub use catalog::{Author, Book, BookInstance, BookInstanceStatus, Genre};
pub use session::{FlashLevel, FlashMessage, Session};
pub use user::{User, UserRole};
