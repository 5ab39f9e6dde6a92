//! HMAC-signed token issuance and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use gatehub_core::config::auth::{AuthConfig, TokenAlgorithm};
use gatehub_core::duration::parse_duration;
use gatehub_core::error::{AppError, ErrorKind};
use gatehub_core::result::AppResult;

use crate::token::claims::TokenClaims;

/// Clock skew tolerated during expiry validation, in seconds.
const VALIDATION_LEEWAY_SECS: u64 = 5;

fn to_jwt_algorithm(algorithm: TokenAlgorithm) -> Algorithm {
    match algorithm {
        TokenAlgorithm::HS256 => Algorithm::HS256,
        TokenAlgorithm::HS384 => Algorithm::HS384,
        TokenAlgorithm::HS512 => Algorithm::HS512,
    }
}

/// Issues and verifies signed session tokens.
///
/// The token payload carries only the session id; all session state lives
/// in the store. Verification is deliberately infallible: any failure —
/// bad signature, expired, malformed — collapses to `None` so callers
/// treat every invalid token the same way.
pub struct TokenManager {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: chrono::Duration,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("algorithm", &self.header.alg)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Build a manager from the auth configuration.
    ///
    /// A malformed `token_expiration` string falls back to 24 hours.
    pub fn new(config: &AuthConfig) -> Self {
        let algorithm = to_jwt_algorithm(config.token_algorithm);
        let mut validation = Validation::new(algorithm);
        validation.leeway = VALIDATION_LEEWAY_SECS;
        validation.validate_exp = true;

        Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
            expiry: parse_duration(&config.token_expiration, chrono::Duration::hours(24)),
        }
    }

    /// The configured token lifetime.
    pub fn expiry(&self) -> chrono::Duration {
        self.expiry
    }

    /// Issue a signed token bound to `session_id`, valid for the
    /// configured lifetime.
    pub fn issue(&self, session_id: &str) -> AppResult<String> {
        let claims = TokenClaims::new(session_id, Utc::now(), self.expiry);
        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to sign token", e))
    }

    /// Verify a token and return the session id it is bound to.
    ///
    /// Returns `None` for any invalid token: bad signature, wrong
    /// algorithm, expired, or malformed.
    pub fn verify(&self, token: &str) -> Option<String> {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.sid),
            Err(e) => {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        debug!("Token rejected: expired");
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        debug!("Token rejected: invalid signature");
                    }
                    _ => debug!(error = %e, "Token rejected"),
                }
                None
            }
        }
    }
}
