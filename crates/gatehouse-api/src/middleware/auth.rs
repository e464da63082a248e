//! Session-cookie authentication checkpoint.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::debug;

use gatehouse_auth::AuthError;
use gatehouse_service::RequestContext;

use crate::error::ApiError;
use crate::extractors::client::client_metadata;
use crate::state::AppState;

/// Rejects requests without a live session and binds the caller's identity.
///
/// A missing cookie yields "authentication required". An unknown or revoked
/// token yields "invalid session" and a lapsed one "session expired". On
/// success a [`RequestContext`] is inserted into the request extensions.
pub async fn require_authentication(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(&state.config.session.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::AuthenticationRequired)?;

    let identity = state.session_manager.validate(&token).await.map_err(|e| {
        debug!(error = %e, path = %request.uri().path(), "Session rejected");
        e
    })?;

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let client = client_metadata(request.headers(), peer);

    let ctx = RequestContext::new(
        identity.user_id,
        identity.session_id,
        identity.role,
        client.ip_address,
        client.user_agent,
    );
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
