//! Signing primitive for entry tokens.
//!
//! Wraps `jsonwebtoken` with the one algorithm the platform accepts for
//! browser entry: RS256, with the issuer name as the header `kid`.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

use crate::error::EntryError;

/// Algorithm used for every entry token.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Sign `claims` with a PEM-encoded RSA private key.
///
/// The resulting compact JWS carries `alg: RS256`, `typ: JWT`, and
/// `kid: key_id` in its header.
///
/// # Errors
///
/// Returns [`EntryError::SigningFailed`] if the key is not a parseable RSA
/// private key or the signature cannot be produced.
pub fn sign_claims<T: Serialize>(
    claims: &T,
    key_pem: &[u8],
    key_id: &str,
) -> Result<String, EntryError> {
    let encoding_key = EncodingKey::from_rsa_pem(key_pem).map_err(|e| EntryError::SigningFailed {
        reason: format!("failed to load RSA private key: {e}"),
    })?;

    let mut header = Header::new(SIGNING_ALGORITHM);
    header.kid = Some(key_id.to_string());

    encode(&header, claims, &encoding_key).map_err(|e| EntryError::SigningFailed {
        reason: format!("JWT encoding failed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::decode_header;
    use serde_json::json;

    use super::*;

    const PRIVATE_KEY: &[u8] = include_bytes!("../../tests/fixtures/rsa_private.pem");

    #[test]
    fn test_header_carries_algorithm_and_kid() {
        let token = sign_claims(&json!({ "jti": "abc" }), PRIVATE_KEY, "example").unwrap();
        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("example"));
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_garbage_key_fails_to_sign() {
        let err = sign_claims(&json!({}), b"not a key", "example").unwrap_err();
        assert!(matches!(err, EntryError::SigningFailed { .. }));
    }

    #[test]
    fn test_public_key_cannot_sign() {
        let public = include_bytes!("../../tests/fixtures/rsa_public.pem");
        let err = sign_claims(&json!({}), public, "example").unwrap_err();
        assert!(matches!(err, EntryError::SigningFailed { .. }));
    }

    #[test]
    fn test_error_does_not_echo_key_material() {
        let err = sign_claims(&json!({}), b"-----BEGIN SECRET-----", "example").unwrap_err();
        assert!(!err.to_string().contains("BEGIN SECRET"));
    }
}
