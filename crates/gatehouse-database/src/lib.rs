//! # gatehouse-database
//!
//! PostgreSQL connection management and concrete repositories for users
//! and sessions.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{SessionRepository, UserRepository};
