//! Role checkpoint. Must be layered inside
//! [`require_authentication`](super::auth::require_authentication).

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use gatehouse_auth::AuthError;
use gatehouse_entity::user::UserRole;
use gatehouse_service::RequestContext;

use crate::error::ApiError;

/// Passes the request on only if the bound identity holds `required`.
pub async fn require_role(
    State(required): State<UserRole>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .ok_or(AuthError::AuthenticationRequired)?;

    if !ctx.has_role(required) {
        warn!(
            user_id = %ctx.user_id,
            role = %ctx.role,
            required = %required,
            path = %request.uri().path(),
            "Access denied"
        );
        return Err(AuthError::AccessDenied.into());
    }

    Ok(next.run(request).await)
}
