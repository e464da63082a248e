//! PostgreSQL backing for the storage capabilities.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use gatehouse_core::result::AppResult;
use gatehouse_database::{SessionRepository, UserRepository};
use gatehouse_entity::session::{CreateSession, Session};
use gatehouse_entity::user::{CreateUser, UpdateProfile, User, UserRole};

use super::traits::{SessionReader, SessionWriter, UserReader, UserWriter};

#[async_trait]
impl UserReader for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        UserRepository::list(self).await
    }
}

#[async_trait]
impl UserWriter for UserRepository {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        UserRepository::create(self, data).await
    }

    async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Option<User>> {
        UserRepository::update_profile(self, id, data).await
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Option<User>> {
        UserRepository::set_active(self, id, is_active).await
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Option<User>> {
        UserRepository::set_role(self, id, role).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        UserRepository::delete(self, id).await
    }
}

#[async_trait]
impl SessionReader for SessionRepository {
    async fn find_session(&self, token: &str) -> AppResult<Option<Session>> {
        self.find_by_token(token).await
    }
}

#[async_trait]
impl SessionWriter for SessionRepository {
    async fn insert_session(&self, data: &CreateSession) -> AppResult<Session> {
        self.create(data).await
    }

    async fn delete_session(&self, token: &str) -> AppResult<bool> {
        self.delete_by_token(token).await
    }

    async fn delete_sessions_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        self.delete_by_user(user_id).await
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.delete_expired(now).await
    }
}
