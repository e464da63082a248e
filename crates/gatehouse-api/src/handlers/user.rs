//! User self-service handlers.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{MessageResponse, UserProfileResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::handlers::auth::expired_cookie;
use crate::state::AppState;

/// GET /api/v1/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .update_profile(&auth, req.into())
        .await?;
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}

/// DELETE /api/v1/user/profile
///
/// Sessions go with the account, so the cookie is cleared as well.
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    state.user_service.delete_account(&auth).await?;
    Ok((
        jar.add(expired_cookie(&state.config.session)),
        Json(MessageResponse::new("User deleted successfully")),
    ))
}
