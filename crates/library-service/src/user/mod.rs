//! User accounts: registration, profile, and login/logout.

pub mod account;
pub mod form;
pub mod service;

pub use account::{AccountService, LoginResult};
pub use form::{RegisterForm, UpdateUserForm};
pub use service::UserService;
