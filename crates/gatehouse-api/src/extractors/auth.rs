//! `AuthUser` extractor: reads the identity bound by the authentication
//! middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_auth::AuthError;
use gatehouse_service::RequestContext;

use crate::error::ApiError;

/// Extracted authenticated user context available in handlers.
///
/// Only resolves on routes behind
/// [`require_authentication`](crate::middleware::auth::require_authentication).
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthUser)
            .ok_or(ApiError::Auth(AuthError::AuthenticationRequired))
    }
}
