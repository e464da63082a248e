//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Bound by the authentication middleware and passed into service methods
/// so every operation knows *who* is acting and from *which* session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The session that authenticated this request.
    pub session_id: Uuid,
    /// The user's role at validation time.
    pub role: UserRole,
    /// Client address, if known.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(
        user_id: Uuid,
        session_id: Uuid,
        role: UserRole,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            role,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Whether the caller holds `role`.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }
}
