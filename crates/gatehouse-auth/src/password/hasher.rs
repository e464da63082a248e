//! Argon2id password hashing and verification.
//!
//! Hashes are emitted in PHC string format
//! (`$argon2id$v=19$m=65536,t=1,p=4$<salt>$<digest>`), so every parameter
//! needed to verify travels with the hash itself.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

use gatehouse_core::config::AuthConfig;
use gatehouse_core::error::AppError;

use crate::error::AuthError;

/// Random salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// Derived key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// Largest salt accepted when decoding a stored hash.
const MAX_DECODED_SALT: usize = 64;

/// Hashes and verifies passwords with Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher from the configured cost parameters.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Self::with_params(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
        )
    }

    /// Build a hasher with explicit memory (KiB), time, and lane costs.
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, Some(KEY_LENGTH))
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Hash `password` under a fresh random salt.
    ///
    /// Fails only when the operating system entropy source is unavailable.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let mut salt_bytes = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| AuthError::internal(format!("Entropy source failure: {e}")))?;

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AuthError::internal(format!("Salt encoding failed: {e}")))?;

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Check `password` against a stored hash.
    ///
    /// The parameters are read from `encoded`, not from this hasher. Any
    /// malformed or non-Argon2id input is a mismatch.
    pub fn verify_password(&self, password: &str, encoded: &str) -> bool {
        rederive(password, encoded).is_some_and(|(expected, actual)| {
            expected.len() == actual.len() && bool::from(expected.ct_eq(&actual))
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Decode `encoded` and derive a digest of `password` under its parameters.
///
/// Returns `(stored_digest, derived_digest)`.
fn rederive(password: &str, encoded: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let parsed = PasswordHash::new(encoded).ok()?;
    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return None;
    }

    let expected = parsed.hash?;
    let params = Params::try_from(&parsed).ok()?;
    let version = match parsed.version {
        Some(v) => Version::try_from(v).ok()?,
        None => Version::default(),
    };

    let mut salt_buf = [0u8; MAX_DECODED_SALT];
    let salt = parsed.salt?.decode_b64(&mut salt_buf).ok()?;

    let mut derived = vec![0u8; expected.len()];
    Argon2::new(Algorithm::Argon2id, version, params)
        .hash_password_into(password.as_bytes(), salt, &mut derived)
        .ok()?;

    Some((expected.as_bytes().to_vec(), derived))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=4096,t=1,p=1$"));
        assert!(hasher.verify_password("secret1", &hash));
        assert!(!hasher.verify_password("secret2", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = fast_hasher();
        let a = hasher.hash_password("secret1").unwrap();
        let b = hasher.hash_password("secret1").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify_password("secret1", &a));
        assert!(hasher.verify_password("secret1", &b));
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let old = PasswordHasher::with_params(8192, 2, 1).unwrap();
        let hash = old.hash_password("rotate-me").unwrap();
        assert!(fast_hasher().verify_password("rotate-me", &hash));
    }

    #[test]
    fn test_malformed_hashes_never_match() {
        let hasher = fast_hasher();
        assert!(!hasher.verify_password("x", ""));
        assert!(!hasher.verify_password("x", "not-a-hash"));
        assert!(!hasher.verify_password("x", "$argon2id$v=19$m=4096,t=1,p=1$$"));
        assert!(!hasher.verify_password(
            "x",
            "$argon2id$v=19$m=4096,t=1,p=1$c2FsdHNhbHRzYWx0$!!!"
        ));
    }

    #[test]
    fn test_other_algorithms_rejected() {
        let hasher = fast_hasher();
        let hash = hasher.hash_password("secret1").unwrap();
        let argon2i = hash.replacen("$argon2id$", "$argon2i$", 1);
        assert!(!hasher.verify_password("secret1", &argon2i));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(PasswordHasher::with_params(0, 1, 1).is_err());
        assert!(PasswordHasher::with_params(4096, 0, 1).is_err());
    }
}
