//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::{UpdateRoleRequest, UpdateStatusRequest};
use crate::dto::response::{UserProfileResponse, UsersListResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UsersListResponse>, ApiError> {
    let users: Vec<UserProfileResponse> = state
        .admin_user_service
        .list_users(&auth)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(UsersListResponse {
        total: users.len(),
        users,
    }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state.admin_user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/admin/users/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state
        .admin_user_service
        .set_active(&auth, id, req.is_active)
        .await?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/admin/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state
        .admin_user_service
        .set_role(&auth, id, req.role)
        .await?;
    Ok(Json(user.into()))
}
