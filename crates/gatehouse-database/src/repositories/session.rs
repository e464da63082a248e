//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_entity::session::{CreateSession, Session};

use super::map_write_error;

/// Repository for session CRUD operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by its bearer token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE session_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    /// Insert a new session. A duplicate token yields `Conflict`.
    pub async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            r#"INSERT INTO sessions (id, user_id, session_token, expires_at, created_at, user_agent, ip_address)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(&data.session_token)
        .bind(data.expires_at)
        .bind(data.created_at)
        .bind(&data.client.user_agent)
        .bind(&data.client.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create session"))
    }

    /// Delete the session holding `token`. Returns whether a row was removed.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session owned by `user_id`.
    pub async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete user sessions", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Purge sessions whose expiry is at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge expired sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
