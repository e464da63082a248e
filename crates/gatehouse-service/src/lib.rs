//! # gatehouse-service
//!
//! Account services that run behind the authentication checkpoint. Each
//! service receives the [`RequestContext`] bound by the middleware and
//! operates on the caller's identity.

pub mod context;
pub mod user;

pub use context::RequestContext;
pub use user::{AdminUserService, UserService};
