//! The form pipeline shared by every create/update endpoint.
//!
//! Stages: a [`RawForm`] is received, [`RawForm::normalize`]d (trimmed) into
//! a [`NormalizedForm`], mapped to a typed [`Form`], and validated against
//! the trimmed text. Only then is the input escaped: invalid submissions
//! produce [`FormOutcome::Invalid`] with the escaped form as an unpersisted
//! draft; valid ones are persisted escaped by the owning service and produce
//! [`FormOutcome::Redirect`].

pub mod date;
pub mod errors;
pub mod raw;

pub use date::parse_iso_date;
pub use errors::{FieldError, FormErrors};
pub use raw::{NormalizedForm, RawForm, escape, sanitize};

use validator::Validate;

/// A typed form built from normalized input.
pub trait Form: Validate + Sized {
    /// Field names in the order errors are reported.
    const FIELDS: &'static [&'static str];

    /// Map normalized key/value pairs onto the form.
    fn from_normalized(form: &NormalizedForm) -> Self;

    /// Validate the trimmed submission, then escape it for the draft and
    /// for storage.
    fn receive(raw: RawForm) -> Received<Self> {
        let trimmed = raw.normalize();
        let errors = FormErrors::validate(&Self::from_normalized(&trimmed));
        Received {
            form: Self::from_normalized(&trimmed.escaped()),
            errors,
            trimmed,
        }
    }
}

/// A validated submission.
#[derive(Debug, Clone)]
pub struct Received<F> {
    /// Escaped input, used for drafts and persisted values.
    pub form: F,
    /// Failures of the declarative rules, measured on trimmed text.
    pub errors: FormErrors,
    /// Trimmed, unescaped input for values that are never rendered.
    pub trimmed: NormalizedForm,
}

/// Terminal state of a create/update submission.
#[derive(Debug, Clone)]
pub enum FormOutcome<D> {
    /// Validation failed: re-render with the draft and ordered errors.
    Invalid {
        /// Sanitized, unpersisted input.
        draft: D,
        /// Errors in field order, async errors last.
        errors: Vec<FieldError>,
    },
    /// Persisted: redirect to the given URL.
    Redirect(String),
}

impl<D> FormOutcome<D> {
    /// Build an invalid outcome from accumulated errors.
    pub fn invalid(draft: D, errors: FormErrors) -> Self {
        Self::Invalid {
            draft,
            errors: errors.into_vec(),
        }
    }
}

/// Terminal state of a delete submission.
#[derive(Debug, Clone)]
pub enum DeleteOutcome<B> {
    /// Dependents exist: re-render the confirmation view listing them.
    Blocked(B),
    /// Removed: redirect to the collection list.
    Deleted(String),
}
