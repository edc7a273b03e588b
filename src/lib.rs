//! identity-entry: signed identity entry URLs for the live events platform.
//!
//! An API client of the platform vouches for a user's identity, access
//! level, and session binding by signing a short-lived RS256 token and
//! redirecting the user's browser to the resulting URL. The platform then
//! opens the session without a separate login.
//!
//! This crate only issues entries. Loading the private key and performing
//! the redirect are left to the caller.

#![forbid(unsafe_code)]

pub mod core;
pub mod error;

pub use crate::core::access::{AccessLevel, parse_access_level};
pub use crate::core::builder::{DEFAULT_DOMAIN, DEFAULT_TTL_SECS, EntryBuilder};
pub use crate::core::claims::{AUTHORIZE_PATH, EntryClaims, IdentityClaim, LoginClaim, PLATFORM_AUDIENCE};
pub use crate::core::clock::{Clock, MockClock, SystemClock};
pub use crate::error::EntryError;
