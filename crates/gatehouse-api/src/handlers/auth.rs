//! Auth handlers: register, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use tracing::info;

use gatehouse_auth::AuthError;
use gatehouse_core::config::SessionConfig;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse, RegisterResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientInfo, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user_id = state.auth_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// The token is returned only as an `HttpOnly` cookie.
pub async fn login(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let user = state.auth_service.login(&req.email, &req.password).await?;
    let issued = state.session_manager.create(user.id, &client).await?;

    let cookie = session_cookie(&state.config.session, issued.token, issued.expires_at)?;
    info!(user_id = %user.id, session_id = %issued.session_id, "User logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Runs behind the authentication checkpoint, so the cookie names a live
/// session owned by `auth`.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let config = &state.config.session;
    let token = jar
        .get(&config.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingSessionToken)?;

    state.session_manager.revoke(&token).await?;
    info!(user_id = %auth.user_id, session_id = %auth.session_id, "User logged out");

    Ok((
        jar.add(expired_cookie(config)),
        Json(MessageResponse::new("Logout successful")),
    ))
}

/// The session cookie, expiring with the session.
pub(crate) fn session_cookie(
    config: &SessionConfig,
    token: String,
    expires_at: DateTime<Utc>,
) -> Result<Cookie<'static>, ApiError> {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .map_err(|e| AuthError::internal(format!("Invalid session expiry: {e}")))?;

    Ok(Cookie::build((config.cookie_name.clone(), token))
        .path(config.cookie_path.clone())
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .expires(expires)
        .build())
}

/// An empty replacement cookie that expired an hour ago.
pub(crate) fn expired_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path(config.cookie_path.clone())
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .expires(OffsetDateTime::now_utc() - time::Duration::hours(1))
        .build()
}
