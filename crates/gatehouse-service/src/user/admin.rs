//! Admin user management: listing, status changes, role changes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gatehouse_auth::{SessionManager, UserReader, UserStore, UserWriter};
use gatehouse_core::error::AppError;
use gatehouse_entity::user::{User, UserRole};

use crate::context::RequestContext;

use super::auth_to_app;

/// Handles administrative user management operations.
pub struct AdminUserService {
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionManager>,
}

impl std::fmt::Debug for AdminUserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserService")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<SessionManager>) -> Self {
        Self { users, sessions }
    }

    /// Lists all users, newest first.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        let users = self.users.list().await?;
        info!(admin_id = %ctx.user_id, count = users.len(), "Listed users");
        Ok(users)
    }

    /// Fetch one account by id.
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Activate or deactivate an account.
    ///
    /// Deactivation revokes every session the account holds.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, AppError> {
        if user_id == ctx.user_id && !is_active {
            return Err(AppError::validation("Cannot deactivate your own account"));
        }

        let user = self
            .users
            .set_active(user_id, is_active)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !is_active {
            self.sessions
                .revoke_all_for_user(user_id)
                .await
                .map_err(auth_to_app)?;
        }

        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            is_active,
            "User status changed"
        );
        Ok(user)
    }

    /// Change an account's role.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        if user_id == ctx.user_id && !role.is_admin() {
            return Err(AppError::validation("Cannot remove your own admin role"));
        }

        let user = self
            .users
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            role = %role,
            "User role changed"
        );
        Ok(user)
    }
}
