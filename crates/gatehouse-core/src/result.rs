//! Convenience result type alias for Gatehouse.

use crate::error::AppError;

/// A specialized `Result` type for Gatehouse storage and infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;
