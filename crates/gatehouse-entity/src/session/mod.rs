//! Session domain entities.

pub mod model;

pub use model::{ClientMetadata, CreateSession, Session};
