//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side session bound to one opaque token.
///
/// Sessions are created on login and destroyed on logout or once found
/// expired. Client metadata is recorded for audit only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Opaque bearer token.
    #[serde(skip_serializing)]
    pub session_token: String,
    /// When the session stops validating.
    pub expires_at: DateTime<Utc>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// User-Agent header value at login.
    pub user_agent: Option<String>,
    /// Originating network address at login.
    pub ip_address: Option<String>,
}

impl Session {
    /// Whether `now` is at or past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Advisory request metadata captured when a session is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Data required to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Freshly generated token.
    pub session_token: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Client metadata.
    pub client: ClientMetadata,
}
