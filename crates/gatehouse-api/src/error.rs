//! Maps authentication and domain errors to HTTP responses.
//!
//! Login and registration failures collapse to fixed messages so a client
//! cannot learn which field collided or whether an email is registered.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use gatehouse_auth::AuthError;
use gatehouse_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Every failure a handler or middleware can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    App(#[from] AppError),

    /// The body failed to parse or validate.
    #[error("invalid request body")]
    InvalidBody,

    /// Logout was called without a session cookie.
    #[error("no session token")]
    MissingSessionToken,

    /// The process is shutting down.
    #[error("service draining")]
    Draining,
}

impl ApiError {
    /// Status, code, and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Auth(err) => auth_parts(err),
            Self::App(err) => app_parts(err),
            Self::InvalidBody => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid request body".to_string(),
            ),
            Self::MissingSessionToken => (
                StatusCode::BAD_REQUEST,
                "NO_SESSION_TOKEN",
                "No session token".to_string(),
            ),
            Self::Draining => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service is shutting down".to_string(),
            ),
        }
    }
}

fn auth_parts(err: &AuthError) -> (StatusCode, &'static str, String) {
    let (status, code, message) = match err {
        AuthError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Invalid request body",
        ),
        AuthError::DuplicateIdentity { .. } => (
            StatusCode::BAD_REQUEST,
            "REGISTRATION_FAILED",
            "User already exists or failed to create",
        ),
        AuthError::RegistrationFailed(source) => {
            error!(error = %source, "User creation failed");
            (
                StatusCode::BAD_REQUEST,
                "REGISTRATION_FAILED",
                "User already exists or failed to create",
            )
        }
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid credentials",
        ),
        AuthError::AuthenticationRequired => (
            StatusCode::UNAUTHORIZED,
            "AUTHENTICATION_REQUIRED",
            "Authentication required",
        ),
        AuthError::InvalidSession => (
            StatusCode::UNAUTHORIZED,
            "INVALID_SESSION",
            "Invalid session",
        ),
        AuthError::SessionExpired => (
            StatusCode::UNAUTHORIZED,
            "SESSION_EXPIRED",
            "Session expired",
        ),
        AuthError::AccessDenied => (StatusCode::FORBIDDEN, "ACCESS_DENIED", "Access denied"),
        AuthError::TokenCollision => {
            error!("Session token collision");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_CREATION_FAILED",
                "Failed to create session",
            )
        }
        AuthError::SessionCreation(source) => {
            error!(error = %source, "Session creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_CREATION_FAILED",
                "Failed to create session",
            )
        }
        AuthError::Internal(source) => {
            error!(error = %source, "Internal authentication error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            )
        }
    };
    (status, code, message.to_string())
}

fn app_parts(err: &AppError) -> (StatusCode, &'static str, String) {
    match err.kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
        ErrorKind::Validation => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            err.message.clone(),
        ),
        ErrorKind::Conflict => {
            warn!(error = %err.message, "Request conflicted with existing data");
            (StatusCode::CONFLICT, "CONFLICT", err.message.clone())
        }
        ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
            error!(kind = ?err.kind, error = %err, "Internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
