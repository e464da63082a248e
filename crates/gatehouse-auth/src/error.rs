//! Authentication error taxonomy.
//!
//! Every storage or crypto failure is translated into one of these kinds
//! before it leaves this crate.

use gatehouse_core::error::AppError;
use thiserror::Error;

/// Failures surfaced by the authentication layer.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An account with the same email or username already exists.
    #[error("duplicate identity on {field}")]
    DuplicateIdentity { field: &'static str },

    /// The user record could not be persisted.
    #[error("registration failed")]
    RegistrationFailed(#[source] AppError),

    /// Unknown email, wrong password, or inactive account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session token was presented.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The token matches no live session, or its owner is absent or inactive.
    #[error("invalid session")]
    InvalidSession,

    /// The session existed but its validity window has passed.
    #[error("session expired")]
    SessionExpired,

    /// Authenticated, but the role does not permit the request.
    #[error("access denied")]
    AccessDenied,

    /// The store rejected a freshly generated token as a duplicate.
    #[error("session token collision")]
    TokenCollision,

    /// The session record could not be persisted.
    #[error("session creation failed")]
    SessionCreation(#[source] AppError),

    /// Storage or entropy failure.
    #[error("internal error: {0}")]
    Internal(#[from] AppError),
}

impl AuthError {
    /// Shorthand for an internal failure with a plain message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(AppError::internal(message))
    }
}
