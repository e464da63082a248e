//! Opaque session token generation.

pub mod generator;

pub use generator::{SessionTokenGenerator, TOKEN_BYTES};
