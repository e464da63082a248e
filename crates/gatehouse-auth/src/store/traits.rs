//! Narrow storage contracts.
//!
//! Uniqueness violations are reported as `ErrorKind::Conflict` so callers
//! can tell a collision apart from an unavailable store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use gatehouse_core::result::AppResult;
use gatehouse_entity::session::{CreateSession, Session};
use gatehouse_entity::user::{CreateUser, UpdateProfile, User, UserRole};

/// Read access to user records.
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Look up a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Look up a user by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users, newest first.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Write access to user records.
#[async_trait]
pub trait UserWriter: Send + Sync {
    /// Persist a new user. Email or username collisions yield `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update and refresh `updated_at`. `None` if absent.
    async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Option<User>>;

    /// Set the active flag. `None` if absent.
    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Option<User>>;

    /// Set the role. `None` if absent.
    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Option<User>>;

    /// Delete a user together with all of its sessions.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Read access to session records.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Look up a session by its token.
    async fn find_session(&self, token: &str) -> AppResult<Option<Session>>;
}

/// Write access to session records.
#[async_trait]
pub trait SessionWriter: Send + Sync {
    /// Persist a new session. A duplicate token yields `Conflict`.
    async fn insert_session(&self, data: &CreateSession) -> AppResult<Session>;

    /// Delete by token. Returns whether anything was removed.
    async fn delete_session(&self, token: &str) -> AppResult<bool>;

    /// Delete every session owned by `user_id`.
    async fn delete_sessions_for_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Delete sessions with `expires_at <= now`.
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Full user access.
pub trait UserStore: UserReader + UserWriter {}

impl<T: UserReader + UserWriter + ?Sized> UserStore for T {}

/// Full session access.
pub trait SessionStore: SessionReader + SessionWriter {}

impl<T: SessionReader + SessionWriter + ?Sized> SessionStore for T {}
