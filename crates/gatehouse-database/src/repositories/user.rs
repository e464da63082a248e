//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_entity::user::{CreateUser, UpdateProfile, User, UserRole};

use super::map_write_error;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// All users, newest first.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Insert a new user. Email or username collisions yield `Conflict`.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, email, username, first_name, last_name, password_hash, role, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user"))
    }

    /// Apply a partial profile update. `updated_at` is always refreshed.
    pub async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users SET
                   first_name = COALESCE($2, first_name),
                   last_name  = COALESCE($3, last_name),
                   username   = COALESCE($4, username),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user profile"))
    }

    /// Activate or deactivate an account.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user status", e))
    }

    /// Change a user's role.
    pub async fn set_role(&self, id: Uuid, role: UserRole) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user role", e))
    }

    /// Delete a user. Sessions go with it via `ON DELETE CASCADE`.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
