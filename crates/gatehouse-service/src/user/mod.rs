//! User-facing and administrative account services.

pub mod admin;
pub mod service;

pub use admin::AdminUserService;
pub use service::UserService;

use gatehouse_auth::AuthError;
use gatehouse_core::error::AppError;

/// Collapse an authentication-layer failure into an infrastructure error.
pub(crate) fn auth_to_app(err: AuthError) -> AppError {
    match err {
        AuthError::Internal(source)
        | AuthError::SessionCreation(source)
        | AuthError::RegistrationFailed(source) => source,
        other => AppError::internal(other.to_string()),
    }
}
