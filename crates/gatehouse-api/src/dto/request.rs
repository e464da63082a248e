//! Request DTOs with validation.
//!
//! Password strength is enforced by the configured password policy, not
//! here, so only presence is checked.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatehouse_auth::Registration;
use gatehouse_entity::user::{UpdateProfile, UserRole};

/// Registration request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            email: req.email,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

/// Login request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        UpdateProfile {
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
        }
    }
}

/// Admin: activate or deactivate an account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

/// Admin: change an account's role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}
