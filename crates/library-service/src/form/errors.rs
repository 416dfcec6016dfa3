//! Ordered validation error accumulation.

use serde::Serialize;
use validator::Validate;

use super::Form;

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field the rule applies to.
    pub field: String,
    /// Message shown to the user.
    pub message: String,
}

/// Errors collected over every rule of a form.
///
/// Declarative and runtime field rules stay in the form's field order;
/// rules that consult the store are appended after them.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: &'static [&'static str],
    field_errors: Vec<FieldError>,
    store_errors: Vec<FieldError>,
}

impl FormErrors {
    /// Run the declarative rules of a form.
    pub fn validate<F: Form>(form: &F) -> Self {
        let mut errors = Self {
            fields: F::FIELDS,
            ..Self::default()
        };
        if let Err(report) = form.validate() {
            let by_field = report.field_errors();
            for field in F::FIELDS {
                let Some(failures) = by_field.get(*field) else {
                    continue;
                };
                for failure in failures.iter() {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"));
                    errors.field_errors.push(FieldError {
                        field: (*field).to_string(),
                        message,
                    });
                }
            }
        }
        errors
    }

    /// Record a runtime rule failure, keeping field order.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let rank = |name: &str| self.fields.iter().position(|f| *f == name);
        let target = rank(field);
        let at = self
            .field_errors
            .iter()
            .position(|e| rank(&e.field) > target)
            .unwrap_or(self.field_errors.len());
        self.field_errors.insert(
            at,
            FieldError {
                field: field.to_string(),
                message: message.into(),
            },
        );
    }

    /// Record a failure from a rule that consulted the store.
    pub fn add_async(&mut self, field: &str, message: impl Into<String>) {
        self.store_errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Whether every rule passed.
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.store_errors.is_empty()
    }

    /// Flatten into the final ordered list.
    pub fn into_vec(self) -> Vec<FieldError> {
        let mut all = self.field_errors;
        all.extend(self.store_errors);
        all
    }
}
