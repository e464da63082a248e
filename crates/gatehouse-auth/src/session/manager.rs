//! Session lifecycle manager: issue, validate, revoke.
//!
//! Expiry is checked lazily on every validation. A session is live while
//! `now < expires_at` and its owner exists and is active.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use gatehouse_core::config::SessionConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::traits::Clock;
use gatehouse_entity::session::{ClientMetadata, CreateSession};
use gatehouse_entity::user::UserRole;

use crate::error::AuthError;
use crate::store::{SessionReader, SessionStore, SessionWriter, UserReader};
use crate::token::SessionTokenGenerator;

/// A freshly issued session.
#[derive(Clone)]
pub struct IssuedSession {
    /// Session record id.
    pub session_id: Uuid,
    /// Bearer token to hand to the client.
    pub token: String,
    /// When the session stops validating.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("session_id", &self.session_id)
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The identity a valid token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub role: UserRole,
    pub session_id: Uuid,
}

/// Issues, validates, and revokes server-side sessions.
pub struct SessionManager {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserReader>,
    generator: SessionTokenGenerator,
    clock: Arc<dyn Clock>,
    validity: TimeDelta,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("clock", &self.clock)
            .field("validity", &self.validity)
            .finish()
    }
}

impl SessionManager {
    /// Creates a manager whose validity window comes from `config`.
    ///
    /// Rejects a zero window or one too large to represent.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserReader>,
        clock: Arc<dyn Clock>,
        config: &SessionConfig,
    ) -> Result<Self, AppError> {
        let validity = i64::try_from(config.validity_hours)
            .ok()
            .filter(|hours| *hours > 0)
            .and_then(TimeDelta::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Invalid session validity: {} hours",
                    config.validity_hours
                ))
            })?;

        Ok(Self {
            sessions,
            users,
            generator: SessionTokenGenerator::new(),
            clock,
            validity,
        })
    }

    /// Start a new session for `user_id`.
    ///
    /// A token rejected by the store as a duplicate surfaces as
    /// [`AuthError::TokenCollision`]; any other failure as
    /// [`AuthError::SessionCreation`].
    pub async fn create(
        &self,
        user_id: Uuid,
        client: &ClientMetadata,
    ) -> Result<IssuedSession, AuthError> {
        let token = self.generator.generate().map_err(|e| match e {
            AuthError::Internal(source) => AuthError::SessionCreation(source),
            other => other,
        })?;

        let now = self.clock.now();
        let expires_at = now.checked_add_signed(self.validity).ok_or_else(|| {
            AuthError::SessionCreation(AppError::internal("Session expiry out of range"))
        })?;
        let data = CreateSession {
            user_id,
            session_token: token,
            created_at: now,
            expires_at,
            client: client.clone(),
        };

        let session = self.sessions.insert_session(&data).await.map_err(|e| {
            if e.is_conflict() {
                warn!(user_id = %user_id, "Generated session token collided with an existing one");
                AuthError::TokenCollision
            } else {
                AuthError::SessionCreation(e)
            }
        })?;

        info!(
            user_id = %user_id,
            session_id = %session.id,
            expires_at = %expires_at,
            "Session created"
        );

        Ok(IssuedSession {
            session_id: session.id,
            token: data.session_token,
            expires_at,
        })
    }

    /// Resolve `token` to the identity of its owner.
    pub async fn validate(&self, token: &str) -> Result<SessionIdentity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidSession);
        }

        let session = self
            .sessions
            .find_session(token)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired_at(self.clock.now()) {
            if let Err(e) = self.sessions.delete_session(token).await {
                warn!(
                    session_id = %session.id,
                    error = %e,
                    "Failed to delete expired session"
                );
            }
            debug!(session_id = %session.id, "Session expired");
            return Err(AuthError::SessionExpired);
        }

        match self.users.find_by_id(session.user_id).await? {
            Some(user) if user.is_active => Ok(SessionIdentity {
                user_id: user.id,
                role: user.role,
                session_id: session.id,
            }),
            _ => {
                debug!(
                    session_id = %session.id,
                    user_id = %session.user_id,
                    "Session owner missing or inactive"
                );
                Err(AuthError::InvalidSession)
            }
        }
    }

    /// Delete the session holding `token`. Unknown tokens are not an error.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let removed = self.sessions.delete_session(token).await?;
        debug!(removed, "Session revoked");
        Ok(())
    }

    /// Delete every session owned by `user_id`.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, AuthError> {
        let count = self.sessions.delete_sessions_for_user(user_id).await?;
        if count > 0 {
            info!(user_id = %user_id, count, "Revoked all sessions for user");
        }
        Ok(count)
    }

    /// Delete sessions whose validity window has passed.
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        Ok(self
            .sessions
            .delete_expired_sessions(self.clock.now())
            .await?)
    }
}
