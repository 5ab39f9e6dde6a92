//! Token issuance configuration.

use serde::{Deserialize, Serialize};

/// Signing algorithm for session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenAlgorithm {
    /// HMAC with SHA-256.
    HS256,
    /// HMAC with SHA-384.
    HS384,
    /// HMAC with SHA-512.
    HS512,
}

impl Default for TokenAlgorithm {
    fn default() -> Self {
        Self::HS256
    }
}

impl std::fmt::Display for TokenAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HS256 => write!(f, "HS256"),
            Self::HS384 => write!(f, "HS384"),
            Self::HS512 => write!(f, "HS512"),
        }
    }
}

/// Token issuance and validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key material for HMAC signing.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Signing algorithm.
    #[serde(default)]
    pub token_algorithm: TokenAlgorithm,
    /// Token lifetime as a compact duration string (e.g. `"24h"`).
    #[serde(default = "default_token_expiration")]
    pub token_expiration: String,
    /// Bytes of randomness drawn per session id.
    #[serde(default = "default_token_id_length")]
    pub token_id_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_algorithm: TokenAlgorithm::default(),
            token_expiration: default_token_expiration(),
            token_id_length: default_token_id_length(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_expiration() -> String {
    "24h".to_string()
}

fn default_token_id_length() -> usize {
    32
}
