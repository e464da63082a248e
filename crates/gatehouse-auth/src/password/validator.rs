//! Password policy enforcement for new passwords.

use gatehouse_core::config::AuthConfig;

use crate::error::AuthError;

/// Validates candidate passwords against the configured length policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length.max(config.password_min_length),
        }
    }

    /// Check `password`, counting characters rather than bytes.
    pub fn validate(&self, password: &str) -> Result<(), AuthError> {
        let length = password.chars().count();

        if length < self.min_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > self.max_length {
            return Err(AuthError::Validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        if password.trim().is_empty() {
            return Err(AuthError::Validation(
                "Password must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}
