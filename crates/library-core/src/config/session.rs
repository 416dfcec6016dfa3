//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds, renewed on every session write.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Whether the cookie is flagged `Secure` (HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_seconds: default_ttl(),
            cookie_secure: false,
        }
    }
}

fn default_cookie_name() -> String {
    "library.sid".to_string()
}

fn default_ttl() -> u64 {
    7 * 24 * 60 * 60
}
