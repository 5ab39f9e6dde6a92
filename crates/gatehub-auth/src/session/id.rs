//! Session id generation.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate an opaque session id from `random_bytes` bytes of OS
/// randomness, hashed to a fixed-width lowercase hex string.
pub fn generate_session_id(random_bytes: usize) -> String {
    // Clamp so a misconfigured length can never collapse the id space.
    let mut buf = vec![0u8; random_bytes.max(16)];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(Sha256::digest(&buf))
}
