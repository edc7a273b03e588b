//! Shared test fixtures and helper utilities.
//!
//! Provides the RSA key pair used to sign and verify entries in both the
//! library and CLI integration tests.
#![allow(dead_code)]

use identity_entry::EntryClaims;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Path to the test RSA private key fixture (PKCS#1 PEM).
pub const RSA_PRIVATE_KEY_PATH: &str = "tests/fixtures/rsa_private.pem";

/// Path to the matching RSA public key fixture.
pub const RSA_PUBLIC_KEY_PATH: &str = "tests/fixtures/rsa_public.pem";

/// Path to a public key that did not sign anything.
pub const RSA_OTHER_PUBLIC_KEY_PATH: &str = "tests/fixtures/rsa_other_public.pem";

/// Issuer name used across tests, as in the platform's own example.
pub const ISSUER: &str = "example";

/// Base path every entry URL on the default domain starts with.
pub const DEFAULT_ENTRY_BASE: &str = "https://live2.digitell.io/api/browser/authorize/sl/identity";

pub fn private_key() -> Vec<u8> {
    std::fs::read(RSA_PRIVATE_KEY_PATH).unwrap()
}

/// All `(key, value)` query pairs of an entry URL, in order.
pub fn query_pairs(entry_url: &str) -> Vec<(String, String)> {
    url::Url::parse(entry_url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// The single `token` parameter of an entry URL.
pub fn token_of(entry_url: &str) -> String {
    let tokens: Vec<String> = query_pairs(entry_url)
        .into_iter()
        .filter(|(k, _)| k == "token")
        .map(|(_, v)| v)
        .collect();
    assert_eq!(tokens.len(), 1, "expected exactly one token parameter");
    tokens.into_iter().next().unwrap()
}

/// Verify a token against `public_key_path` and return its claims.
///
/// Expiry is not enforced so tests can inspect pinned timestamps.
pub fn verify_with(token: &str, public_key_path: &str) -> jsonwebtoken::errors::Result<EntryClaims> {
    let public_key = std::fs::read(public_key_path).unwrap();
    let key = DecodingKey::from_rsa_pem(&public_key)?;
    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);
    validation.set_audience(&["live.digitellinc.com/api/browser/authorize/sl/identity"]);
    decode::<EntryClaims>(token, &key, &validation).map(|data| data.claims)
}

/// Verify a token against the fixture public key and return its claims.
pub fn verify(token: &str) -> EntryClaims {
    verify_with(token, RSA_PUBLIC_KEY_PATH).unwrap()
}
