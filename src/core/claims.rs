//! Claim set carried inside the signed entry token.
//!
//! Field order matches what the platform has always received:
//! `aud`, `identity`, `session`, `iat`, `exp`, `jti`, then the optional
//! `login` override object.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::EntryError;

/// Path of the browser identity authorisation endpoint on the platform.
pub const AUTHORIZE_PATH: &str = "/api/browser/authorize/sl/identity";

/// Scheme-less audience string the platform has always accepted.
pub const PLATFORM_AUDIENCE: &str = "live.digitellinc.com/api/browser/authorize/sl/identity";

/// The full claim payload of an entry token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryClaims {
    /// Always three entries; see [`audience`].
    pub aud: Vec<String>,
    pub identity: IdentityClaim,
    /// Opaque reference to the live session being entered.
    pub session: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    /// Omitted entirely when neither an access level nor a title is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<LoginClaim>,
}

/// The user being vouched for. Empty strings mean "not asserted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub identifier: String,
    pub name: String,
    pub email: String,
}

/// Per-entry overrides of the user's role on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

impl LoginClaim {
    /// Build the override object, or `None` when there is nothing to override.
    ///
    /// An access level of 0 counts as unset, as does an empty title.
    #[must_use]
    pub fn from_overrides(access_level: i64, custom_title: &str) -> Option<Self> {
        let login = Self {
            access: (access_level != 0).then_some(access_level),
            custom_title: (!custom_title.is_empty()).then(|| custom_title.to_string()),
        };
        (login.access.is_some() || login.custom_title.is_some()).then_some(login)
    }
}

/// Extract the host component of a target domain, exactly as written.
///
/// The domain must be an absolute URL (`https://host`) or scheme-relative
/// (`//host`). The host is cut from the input text itself, so case and
/// non-ASCII labels are preserved; userinfo and port are dropped.
///
/// # Errors
///
/// Returns [`EntryError::InvalidDomain`] if the domain does not parse as a
/// URL or has no host.
pub fn domain_host(domain: &str) -> Result<String, EntryError> {
    let invalid = |reason: String| EntryError::InvalidDomain {
        domain: domain.to_string(),
        reason,
    };

    let (parsed, after_scheme) = match domain.strip_prefix("//") {
        Some(rest) => (Url::parse(&format!("https:{domain}")), rest),
        None => (
            Url::parse(domain),
            domain.split_once("://").map_or("", |(_, rest)| rest),
        ),
    };
    let parsed = parsed.map_err(|e| invalid(e.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("URL has no host".to_string()));
    }

    let authority = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = if host_port.starts_with('[') {
        host_port.split_inclusive(']').next().unwrap_or_default()
    } else {
        host_port.split(':').next().unwrap_or_default()
    };

    if host.is_empty() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(host.to_string())
}

/// The three audience strings an entry token is valid for.
///
/// The same endpoint in three shapes: the fixed platform audience, the
/// bare host of `domain`, and `domain` joined with [`AUTHORIZE_PATH`].
/// `domain` is used verbatim, without trailing slash normalisation.
///
/// # Errors
///
/// Returns [`EntryError::InvalidDomain`] if no host can be extracted.
pub fn audience(domain: &str) -> Result<Vec<String>, EntryError> {
    Ok(vec![
        PLATFORM_AUDIENCE.to_string(),
        domain_host(domain)?,
        format!("{domain}{AUTHORIZE_PATH}"),
    ])
}
