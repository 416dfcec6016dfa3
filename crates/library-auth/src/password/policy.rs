//! Password policy enforcement for new passwords.

use library_core::config::AuthConfig;
use library_core::error::AppError;

/// Validates new passwords against the configured minimum length.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns the configured minimum length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Validates a password against the policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length() {
        let policy = PasswordPolicy::new(&AuthConfig::default());
        assert!(policy.validate("12345").is_err());
        assert!(policy.validate("123456").is_ok());
        // Counted in characters, not bytes.
        assert!(policy.validate("ééééé").is_err());
    }
}
