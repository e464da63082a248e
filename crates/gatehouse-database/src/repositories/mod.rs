//! Repositories over the `users` and `sessions` tables.

pub mod session;
pub mod user;

pub use session::SessionRepository;
pub use user::UserRepository;

use gatehouse_core::error::{AppError, ErrorKind};

/// Translate a write failure, surfacing unique violations as `Conflict`.
pub(crate) fn map_write_error(err: sqlx::Error, context: &str) -> AppError {
    let unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if unique {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate key"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
