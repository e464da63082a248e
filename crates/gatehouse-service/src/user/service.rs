//! User self-service operations: view, edit, and delete one's own profile.

use std::sync::Arc;

use tracing::info;

use gatehouse_auth::{UserReader, UserStore, UserWriter};
use gatehouse_core::error::AppError;
use gatehouse_entity::user::{UpdateProfile, User};

use crate::context::RequestContext;

/// Handles user self-service operations.
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Apply a partial update to the caller's profile.
    ///
    /// Only supplied fields change; `updated_at` is refreshed regardless.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: UpdateProfile,
    ) -> Result<User, AppError> {
        let update = UpdateProfile {
            first_name: non_blank(update.first_name, "First name")?,
            last_name: non_blank(update.last_name, "Last name")?,
            username: non_blank(update.username, "Username")?,
        };

        if let Some(username) = &update.username {
            if let Some(existing) = self.users.find_by_username(username).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict("Username is already taken"));
                }
            }
        }

        let user = self
            .users
            .update_profile(ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Delete the caller's account. Its sessions are removed with it.
    pub async fn delete_account(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if !self.users.delete(ctx.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %ctx.user_id, "Account deleted");
        Ok(())
    }
}

/// Trim an optional field, rejecting values that are present but blank.
fn non_blank(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                Err(AppError::validation(format!("{field} cannot be empty")))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}
