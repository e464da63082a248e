//! # gatehouse-core
//!
//! Core crate for Gatehouse. Contains configuration schemas, the unified
//! error system, and the small traits shared by every other crate.
//!
//! This crate has **no** internal dependencies on other Gatehouse crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
