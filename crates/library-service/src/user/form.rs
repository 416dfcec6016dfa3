//! Registration and profile forms.
//!
//! Password fields are never serialized, so a re-rendered draft does not
//! echo them back.

use serde::Serialize;
use validator::Validate;

use crate::form::{Form, NormalizedForm};

/// Sanitized registration input.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username must be specified."))]
    pub username: String,
    #[validate(length(min = 1, message = "Full name must be specified."))]
    pub fullname: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    #[validate(must_match(other = "password", message = "Password confirmation does not match."))]
    pub confirm_password: String,
}

impl Form for RegisterForm {
    const FIELDS: &'static [&'static str] =
        &["username", "fullname", "email", "password", "confirm_password"];

    fn from_normalized(form: &NormalizedForm) -> Self {
        Self {
            username: form.text("username"),
            fullname: form.text("fullname"),
            email: form.text("email"),
            password: form.text("password"),
            confirm_password: form.text("confirm_password"),
        }
    }
}

/// Sanitized profile update input. Role and password are optional.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateUserForm {
    #[validate(length(min = 1, message = "Full name must be specified."))]
    pub fullname: String,
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    pub role: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing)]
    pub confirm_password: Option<String>,
}

impl Form for UpdateUserForm {
    const FIELDS: &'static [&'static str] =
        &["fullname", "email", "role", "password", "confirm_password"];

    fn from_normalized(form: &NormalizedForm) -> Self {
        Self {
            fullname: form.text("fullname"),
            email: form.text("email"),
            role: form.optional("role"),
            password: form.optional("password"),
            confirm_password: form.optional("confirm_password"),
        }
    }
}
