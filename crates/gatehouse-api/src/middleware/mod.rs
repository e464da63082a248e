//! Request checkpoints and cross-cutting layers.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rbac;
pub mod readiness;
