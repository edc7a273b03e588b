//! Domain error types for identity-entry.
//!
//! All builder and CLI errors are defined here using `thiserror`.
//! The binary converts them to user-facing messages at the command boundary.

use thiserror::Error;

/// Errors that can occur while building, signing, or inspecting an entry.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The operating system's secure random source produced no output.
    #[error("secure randomness unavailable: {reason}")]
    RandomnessUnavailable {
        /// Description of the random source failure.
        reason: String,
    },

    /// Signing the claim set failed (bad key material or crypto error).
    #[error("signing failed: {reason}")]
    SigningFailed {
        /// Description of the signing failure.
        reason: String,
    },

    /// The target domain is not an absolute URL with a host.
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain {
        /// The domain as supplied.
        domain: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// The provided token does not have the expected three-part structure.
    #[error("invalid token format: expected 'header.payload.signature' structure")]
    InvalidTokenFormat,

    /// Failed to decode base64url-encoded token segment.
    #[error("failed to decode {segment}: invalid base64url encoding")]
    Base64DecodeError {
        /// Which segment failed to decode (e.g., "header", "payload").
        segment: String,
    },

    /// Failed to parse decoded JSON content.
    #[error("failed to parse {segment} as JSON: {reason}")]
    JsonParseError {
        /// Which segment failed to parse (e.g., "header", "payload").
        segment: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// An entry URL was given but it carries no `token` query parameter.
    #[error("entry URL has no 'token' query parameter")]
    MissingTokenParameter,

    /// Failed to read the provided key file.
    #[error("failed to read key file '{path}': {reason}")]
    KeyFileError {
        /// Path to the key file.
        path: String,
        /// Description of the read failure.
        reason: String,
    },

    /// No signing key was provided via any input method.
    #[error("no signing key provided: pass --key-file or --key-env")]
    NoSigningKey,

    /// No token was provided via any input method.
    #[error("no token provided: pass a URL or token as an argument, via --token-env, or through stdin")]
    NoTokenProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name cannot be looked up.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },

    /// An access level is neither a known tier name nor an integer.
    #[error("invalid access level '{value}': expected observer, participant, host, presenter, or an integer")]
    InvalidAccessLevel {
        /// The rejected value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomness_unavailable_display() {
        let err = EntryError::RandomnessUnavailable {
            reason: "entropy source closed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "secure randomness unavailable: entropy source closed"
        );
    }

    #[test]
    fn test_signing_failed_display() {
        let err = EntryError::SigningFailed {
            reason: "InvalidKeyFormat".to_string(),
        };
        assert_eq!(err.to_string(), "signing failed: InvalidKeyFormat");
    }

    #[test]
    fn test_invalid_domain_display_includes_domain_and_reason() {
        let err = EntryError::InvalidDomain {
            domain: "live2.digitell.io".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().contains("'live2.digitell.io'"));
        assert!(err.to_string().contains("relative URL without a base"));
    }

    #[test]
    fn test_invalid_token_format_display() {
        let err = EntryError::InvalidTokenFormat;
        assert_eq!(
            err.to_string(),
            "invalid token format: expected 'header.payload.signature' structure"
        );
    }

    #[test]
    fn test_base64_decode_error_display_includes_segment() {
        let err = EntryError::Base64DecodeError {
            segment: "header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to decode header: invalid base64url encoding"
        );
    }

    #[test]
    fn test_key_file_error_display() {
        let err = EntryError::KeyFileError {
            path: "/tmp/example.pem".to_string(),
            reason: "file not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read key file '/tmp/example.pem': file not found"
        );
    }

    #[test]
    fn test_no_token_provided_display() {
        let err = EntryError::NoTokenProvided;
        assert!(err.to_string().contains("no token provided"));
        assert!(err.to_string().contains("--token-env"));
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_env_var_not_found_display() {
        let err = EntryError::EnvVarNotFound {
            name: "ENTRY_KEY".to_string(),
        };
        assert_eq!(err.to_string(), "environment variable 'ENTRY_KEY' is not set");
    }

    #[test]
    fn test_invalid_access_level_lists_tiers() {
        let err = EntryError::InvalidAccessLevel {
            value: "admin".to_string(),
        };
        assert!(err.to_string().contains("'admin'"));
        assert!(err.to_string().contains("presenter"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EntryError>();
    }
}
