//! In-memory store for single-node deployments and tests.
//!
//! Enforces the same uniqueness and cascade rules as the relational schema:
//! email and username are unique ignoring case, tokens are unique, and
//! deleting a user removes its sessions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_entity::session::{CreateSession, Session};
use gatehouse_entity::user::{CreateUser, UpdateProfile, User, UserRole};

use super::traits::{SessionReader, SessionWriter, UserReader, UserWriter};

#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<Uuid, User>,
    /// Keyed by token.
    sessions: HashMap<String, Session>,
}

impl InnerState {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.to_lowercase() == email.to_lowercase())
    }

    fn username_taken(&self, username: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.username.to_lowercase() == username.to_lowercase())
    }
}

/// Users and sessions held in process memory behind a Tokio `RwLock`.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired or not.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }
}

#[async_trait]
impl UserReader for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let username = username.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username.to_lowercase() == username)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[async_trait]
impl UserWriter for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;

        if state.email_taken(&data.email, None) {
            return Err(AppError::conflict("Failed to create user: duplicate email"));
        }
        if state.username_taken(&data.username, None) {
            return Err(AppError::conflict("Failed to create user: duplicate username"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            username: data.username.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;

        if let Some(username) = &data.username {
            if state.username_taken(username, Some(id)) {
                return Err(AppError::conflict(
                    "Failed to update user profile: duplicate username",
                ));
            }
        }

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(first_name) = &data.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &data.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;
        Ok(state.users.get_mut(&id).map(|user| {
            user.is_active = is_active;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;
        Ok(state.users.get_mut(&id).map(|user| {
            user.role = role;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.users.remove(&id).is_some();
        if removed {
            state.sessions.retain(|_, s| s.user_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl SessionReader for MemoryStore {
    async fn find_session(&self, token: &str) -> AppResult<Option<Session>> {
        Ok(self.state.read().await.sessions.get(token).cloned())
    }
}

#[async_trait]
impl SessionWriter for MemoryStore {
    async fn insert_session(&self, data: &CreateSession) -> AppResult<Session> {
        let mut state = self.state.write().await;

        if state.sessions.contains_key(&data.session_token) {
            return Err(AppError::conflict("Failed to create session: duplicate key"));
        }
        if !state.users.contains_key(&data.user_id) {
            return Err(AppError::database(
                "Failed to create session: owning user does not exist",
            ));
        }

        let session = Session {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            session_token: data.session_token.clone(),
            expires_at: data.expires_at,
            created_at: data.created_at,
            user_agent: data.client.user_agent.clone(),
            ip_address: data.client.ip_address.clone(),
        };
        state
            .sessions
            .insert(session.session_token.clone(), session.clone());
        Ok(session)
    }

    async fn delete_session(&self, token: &str) -> AppResult<bool> {
        Ok(self.state.write().await.sessions.remove(token).is_some())
    }

    async fn delete_sessions_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - state.sessions.len()) as u64)
    }
}
