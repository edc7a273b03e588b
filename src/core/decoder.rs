//! Unverified decoding of issued entry tokens.
//!
//! Splits a compact JWT into header, payload, and signature, and
//! base64url-decodes the first two as JSON. Signatures are never checked
//! here; this exists so an issuer can see what it is about to hand out.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;
use url::Url;

use crate::error::EntryError;

/// The decoded parts of an entry token.
///
/// Implements a custom `Debug` that redacts `payload` and `signature`
/// to prevent accidental leakage of identity data.
pub struct DecodedToken {
    /// The parsed JWT header (`alg`, `typ`, `kid`).
    pub header: Value,
    /// The parsed claim payload.
    pub payload: Value,
    /// The raw base64url-encoded signature segment.
    pub signature: String,
}

impl fmt::Debug for DecodedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedToken")
            .field("header", &self.header)
            .field("payload", &"[REDACTED]")
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

/// Pull the token out of an entry URL, or pass a bare token through.
///
/// Input that parses as an absolute URL must carry a `token` query
/// parameter; anything else is treated as the token itself.
///
/// # Errors
///
/// Returns [`EntryError::MissingTokenParameter`] for a URL without `token`.
pub fn extract_token(input: &str) -> Result<String, EntryError> {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) if url.has_host() => url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .ok_or(EntryError::MissingTokenParameter),
        _ => Ok(input.to_string()),
    }
}

/// Decode a raw JWT string into its constituent parts.
///
/// # Errors
///
/// Returns an error if the token doesn't have exactly three parts,
/// if base64url decoding fails, or if JSON parsing fails.
pub fn decode_token(token: &str) -> Result<DecodedToken, EntryError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(EntryError::InvalidTokenFormat);
    }

    let header = decode_segment(parts[0], "header")?;
    let payload = decode_segment(parts[1], "payload")?;
    let signature = parts[2].to_string();

    Ok(DecodedToken {
        header,
        payload,
        signature,
    })
}

/// Base64url-decode a segment and parse it as JSON.
fn decode_segment(encoded: &str, segment_name: &str) -> Result<Value, EntryError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| EntryError::Base64DecodeError {
            segment: segment_name.to_string(),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| EntryError::JsonParseError {
        segment: segment_name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Header: {"alg":"RS256","typ":"JWT","kid":"example"}
    // Payload: {"session":"abc-123456","jti":"n1"}
    const TOKEN: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCIsImtpZCI6ImV4YW1wbGUifQ.\
                         eyJzZXNzaW9uIjoiYWJjLTEyMzQ1NiIsImp0aSI6Im4xIn0.\
                         c2lnbmF0dXJl";

    #[test]
    fn test_decode_entry_token() {
        let decoded = decode_token(TOKEN).unwrap();
        assert_eq!(decoded.header["alg"], "RS256");
        assert_eq!(decoded.header["kid"], "example");
        assert_eq!(decoded.payload["session"], "abc-123456");
        assert_eq!(decoded.signature, "c2lnbmF0dXJl");
    }

    #[test]
    fn test_decoded_token_debug_redacts_payload() {
        let decoded = decode_token(TOKEN).unwrap();
        let debug_output = format!("{decoded:?}");
        assert!(debug_output.contains("RS256"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("abc-123456"));
    }

    #[test]
    fn test_decode_token_with_two_parts_fails() {
        let err = decode_token("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0In0").unwrap_err();
        assert!(matches!(err, EntryError::InvalidTokenFormat));
    }

    #[test]
    fn test_decode_token_invalid_base64_payload_fails() {
        let err = decode_token("eyJhbGciOiJIUzI1NiJ9.!!!invalid!!!.sig").unwrap_err();
        assert!(matches!(
            err,
            EntryError::Base64DecodeError { segment } if segment == "payload"
        ));
    }

    #[test]
    fn test_decode_token_invalid_json_header_fails() {
        // base64url("not json")
        let err = decode_token("bm90IGpzb24.eyJzdWIiOiIxMjM0In0.sig").unwrap_err();
        assert!(matches!(
            err,
            EntryError::JsonParseError { segment, .. } if segment == "header"
        ));
    }

    #[test]
    fn test_extract_token_from_entry_url() {
        let url = format!(
            "https://live2.digitell.io/api/browser/authorize/sl/identity?token={TOKEN}&psf_offer_popup=1"
        );
        assert_eq!(extract_token(&url).unwrap(), TOKEN);
    }

    #[test]
    fn test_extract_token_passes_bare_token_through() {
        assert_eq!(extract_token(&format!("{TOKEN}\n")).unwrap(), TOKEN);
    }

    #[test]
    fn test_extract_token_url_without_token_fails() {
        let err = extract_token("https://live2.digitell.io/api/browser/authorize/sl/identity?psf_syschecker=0")
            .unwrap_err();
        assert!(matches!(err, EntryError::MissingTokenParameter));
    }
}
