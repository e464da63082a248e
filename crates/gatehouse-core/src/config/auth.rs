//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential policy and password hashing configuration.
///
/// The Argon2id parameters apply to newly hashed passwords only. Stored
/// hashes carry their own parameters and verify regardless of what is
/// configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2id time cost (iterations).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2id degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Accounts registered with one of these emails receive the admin role.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            admin_emails: Vec::new(),
        }
    }
}

fn default_password_min() -> usize {
    6
}

fn default_password_max() -> usize {
    128
}

fn default_argon2_memory() -> u32 {
    64 * 1024
}

fn default_argon2_iterations() -> u32 {
    1
}

fn default_argon2_parallelism() -> u32 {
    4
}
