//! Session lifetime and cookie configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Validity window in hours, measured from session creation.
    #[serde(default = "default_validity")]
    pub validity_hours: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Path attribute of the session cookie.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// Whether the session cookie is marked `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Whether the background reaper purges expired sessions.
    #[serde(default = "default_true")]
    pub cleanup_enabled: bool,
    /// Interval between reaper runs in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            validity_hours: default_validity(),
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
            cookie_secure: false,
            cleanup_enabled: true,
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_validity() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    60
}
