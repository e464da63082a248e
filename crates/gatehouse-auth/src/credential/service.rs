//! Registration and login.
//!
//! Login failures are undifferentiated: unknown email, wrong
//! password, and inactive account all yield [`AuthError::InvalidCredentials`].
//! The specific reason is logged server-side only.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use gatehouse_core::config::AuthConfig;
use gatehouse_core::error::AppError;
use gatehouse_entity::user::{CreateUser, User, UserRole};

use crate::error::AuthError;
use crate::password::{PasswordHasher, PasswordValidator};
use crate::store::{UserReader, UserStore, UserWriter};

/// Input for [`AuthService::register`].
#[derive(Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Orchestrates registration and credential verification.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    admin_emails: HashSet<String>,
    /// Verified against when the email is unknown so that path costs the
    /// same as a wrong password.
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates the service. Computes the timing-equalization hash up front.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Result<Self, AuthError> {
        let dummy_hash: Arc<str> = hasher.hash_password("gatehouse-timing-equalizer")?.into();
        Ok(Self {
            users,
            hasher,
            validator: PasswordValidator::new(config),
            admin_emails: config
                .admin_emails
                .iter()
                .map(|e| normalize_email(e))
                .collect(),
            dummy_hash,
        })
    }

    /// Create a new active account and return its id.
    ///
    /// Email and username collisions are logged with the colliding field but
    /// are otherwise indistinguishable from a storage failure at the HTTP
    /// boundary.
    pub async fn register(&self, registration: Registration) -> Result<Uuid, AuthError> {
        let email = normalize_email(&registration.email);
        let username = registration.username.trim().to_string();
        let first_name = registration.first_name.trim().to_string();
        let last_name = registration.last_name.trim().to_string();

        if email.is_empty() || username.is_empty() || first_name.is_empty() || last_name.is_empty()
        {
            return Err(AuthError::Validation("Missing required field".to_string()));
        }
        self.validator.validate(&registration.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            warn!(field = "email", "Registration rejected: identity already exists");
            return Err(AuthError::DuplicateIdentity { field: "email" });
        }
        if self.users.find_by_username(&username).await?.is_some() {
            warn!(field = "username", "Registration rejected: identity already exists");
            return Err(AuthError::DuplicateIdentity { field: "username" });
        }

        let password_hash = self.hash_blocking(registration.password).await?;
        let role = if self.admin_emails.contains(&email) {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let data = CreateUser {
            email,
            username,
            first_name,
            last_name,
            password_hash,
            role,
        };

        let user = self.users.create(&data).await.map_err(|e| {
            if e.is_conflict() {
                warn!(field = "email_or_username", "Registration lost a uniqueness race");
                AuthError::DuplicateIdentity {
                    field: "email_or_username",
                }
            } else {
                AuthError::RegistrationFailed(e)
            }
        })?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user.id)
    }

    /// Verify `email` / `password` and return the account on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.verify_blocking(password.to_string(), self.dummy_hash.to_string())
                .await?;
            warn!(reason = "unknown_email", "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            warn!(user_id = %user.id, reason = "wrong_password", "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            warn!(user_id = %user.id, reason = "inactive", "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "Credentials verified");
        Ok(user)
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, password: String, encoded: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let matches = tokio::task::spawn_blocking(move || hasher.verify_password(&password, &encoded))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;
        Ok(matches)
    }
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
