//! Core logic for building and signing identity entries.
//!
//! This module contains the protocol logic separated from CLI concerns.
//! All types and functions here are testable without the CLI layer.

pub mod access;
pub mod builder;
pub mod claims;
pub mod clock;
pub mod decoder;
pub mod nonce;
pub mod signer;
