//! # gatehouse-auth
//!
//! Authentication and session lifecycle for Gatehouse.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing, constant-time verification, and length policy
//! - `token`: opaque session token generation
//! - `store`: narrow storage capabilities with in-memory and PostgreSQL backends
//! - `session`: session issuance, validation, revocation, and the expiry reaper
//! - `credential`: registration and login

pub mod credential;
pub mod error;
pub mod password;
pub mod session;
pub mod store;
pub mod token;

pub use credential::{AuthService, Registration};
pub use error::AuthError;
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{IssuedSession, SessionCleanup, SessionIdentity, SessionManager};
pub use store::{
    MemoryStore, SessionReader, SessionStore, SessionWriter, Stores, UserReader, UserStore,
    UserWriter,
};
pub use token::SessionTokenGenerator;
