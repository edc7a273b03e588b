//! Nonce (`jti`) generation.

use crate::error::EntryError;

/// Number of random bytes behind each nonce (128 bits).
pub const NONCE_BYTES: usize = 16;

/// Generate a fresh nonce: [`NONCE_BYTES`] from the operating system's
/// secure random source, hex encoded.
///
/// # Errors
///
/// Returns [`EntryError::RandomnessUnavailable`] if the OS source fails.
/// There is no fallback to a weaker generator.
pub fn generate_nonce() -> Result<String, EntryError> {
    let mut bytes = [0u8; NONCE_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| EntryError::RandomnessUnavailable {
        reason: e.to_string(),
    })?;
    Ok(hex::encode(bytes))
}
