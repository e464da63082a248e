//! Registration and credential verification.

pub mod service;

pub use service::{AuthService, Registration};
