//! Signed session-token issuance and verification.

pub mod claims;
pub mod manager;

pub use claims::TokenClaims;
pub use manager::TokenManager;
