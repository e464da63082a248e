//! Cryptographically random session tokens.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::AuthError;

/// Bytes of entropy behind each token.
pub const TOKEN_BYTES: usize = 32;

/// Produces unstructured, hex-encoded bearer tokens from the OS entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionTokenGenerator;

impl SessionTokenGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a new token of `2 * TOKEN_BYTES` lowercase hex characters.
    pub fn generate(&self) -> Result<String, AuthError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::internal(format!("Entropy source failure: {e}")))?;
        Ok(hex::encode(bytes))
    }
}
