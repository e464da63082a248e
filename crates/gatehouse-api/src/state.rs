//! Shared application state passed to all handlers via Axum's `State`.

use std::sync::Arc;

use gatehouse_auth::{AuthError, AuthService, PasswordHasher, SessionManager, Stores};
use gatehouse_core::config::AppConfig;
use gatehouse_core::traits::Clock;
use gatehouse_service::{AdminUserService, UserService};

use crate::lifecycle::Readiness;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Registration and credential checks.
    pub auth_service: Arc<AuthService>,
    /// Session issue, validation, and revocation.
    pub session_manager: Arc<SessionManager>,
    /// Self-service profile operations.
    pub user_service: Arc<UserService>,
    /// Admin user management.
    pub admin_user_service: Arc<AdminUserService>,
    /// Flipped to draining when shutdown begins.
    pub readiness: Readiness,
}

impl AppState {
    /// Wire every service onto one storage backend.
    pub fn new(
        config: Arc<AppConfig>,
        stores: Stores,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthError> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            hasher,
            &config.auth,
        )?);
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&stores.sessions),
            Arc::clone(&stores.user_reader),
            clock,
            &config.session,
        )?);
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));
        let admin_user_service = Arc::new(AdminUserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&session_manager),
        ));

        Ok(Self {
            config,
            auth_service,
            session_manager,
            user_service,
            admin_user_service,
            readiness: Readiness::new(),
        })
    }
}
