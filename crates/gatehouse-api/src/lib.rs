//! # gatehouse-api
//!
//! HTTP API layer for Gatehouse built on Axum.
//!
//! Provides the REST endpoints, the authentication and role checkpoints,
//! extractors, DTOs, error mapping, and the server lifecycle (readiness
//! flag and graceful shutdown).

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use lifecycle::Readiness;
pub use state::AppState;
