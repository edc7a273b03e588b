//! Builder for signed identity entry URLs.
//!
//! An [`EntryBuilder`] vouches for one user entering one live session. It
//! is created with the issuer's name and RSA private key, configured through
//! chained setters, and finalised with [`EntryBuilder::to_url`], which signs
//! the claims and returns the URL the user's browser should be sent to.
//!
//! The nonce and issuance time are fixed when the builder is created. Call
//! `to_url` once per builder: every call signs the same `jti`, and the
//! platform may reject the repeats as replays.
//!
//! # Examples
//!
//! ```no_run
//! use identity_entry::EntryBuilder;
//!
//! # fn example() -> Result<(), identity_entry::EntryError> {
//! let pem = std::fs::read("certificates/example.pem").unwrap_or_default();
//! let mut builder = EntryBuilder::new("example", pem)?;
//! builder
//!     .set_name("Joe Blogs")
//!     .set_email("joe.blogs@example.com")
//!     .set_identifier("example\\12345")
//!     .set_session_reference("abc-123456");
//!
//! println!("{}", builder.to_url()?);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use url::form_urlencoded;
use zeroize::Zeroizing;

use crate::core::claims::{self, AUTHORIZE_PATH, EntryClaims, IdentityClaim, LoginClaim};
use crate::core::clock::{Clock, default_clock};
use crate::core::nonce::generate_nonce;
use crate::core::signer::sign_claims;
use crate::error::EntryError;

/// Platform base URL used when no domain is given.
pub const DEFAULT_DOMAIN: &str = "https://live2.digitell.io";

/// Lifetime of a freshly built entry, in seconds.
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Accumulates identity and policy for one entry, then signs it into a URL.
///
/// Implements a custom `Debug` that redacts the signing key, the nonce, and
/// the user's name, email, and identifier.
pub struct EntryBuilder {
    issuer_name: String,
    signing_key: Zeroizing<Vec<u8>>,
    domain: String,
    clock: Arc<dyn Clock>,

    name: String,
    email: String,
    identifier: String,
    session_reference: String,
    access_level: i64,
    custom_title: String,
    issued_time: i64,
    expiry_time: i64,
    nonce: String,
    offer_popup: bool,
    show_system_checker: bool,
    extra_url_parameters: BTreeMap<String, String>,
}

impl EntryBuilder {
    /// Create a builder targeting [`DEFAULT_DOMAIN`].
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::RandomnessUnavailable`] if no nonce can be generated.
    pub fn new(issuer_name: impl Into<String>, signing_key: impl Into<Vec<u8>>) -> Result<Self, EntryError> {
        Self::for_domain(issuer_name, signing_key, DEFAULT_DOMAIN)
    }

    /// Create a builder targeting `domain`, e.g. `https://live2.digitell.io`.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidDomain`] if `domain` has no host, or
    /// [`EntryError::RandomnessUnavailable`] if no nonce can be generated.
    pub fn for_domain(
        issuer_name: impl Into<String>,
        signing_key: impl Into<Vec<u8>>,
        domain: impl Into<String>,
    ) -> Result<Self, EntryError> {
        Self::with_clock(issuer_name, signing_key, domain, default_clock())
    }

    /// Create a builder that reads the time from `clock`.
    ///
    /// Issued-at is stamped from the clock now, expiry [`DEFAULT_TTL_SECS`]
    /// later, and a fresh nonce is drawn from the OS random source.
    ///
    /// # Errors
    ///
    /// Same as [`EntryBuilder::for_domain`].
    pub fn with_clock(
        issuer_name: impl Into<String>,
        signing_key: impl Into<Vec<u8>>,
        domain: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, EntryError> {
        let issuer_name = issuer_name.into();
        let domain = domain.into();
        claims::domain_host(&domain)?;

        let nonce = generate_nonce()?;
        let issued_time = clock.now().timestamp();
        let expiry_time = issued_time + DEFAULT_TTL_SECS;

        debug!(
            issuer = %issuer_name,
            domain = %domain,
            iat = issued_time,
            exp = expiry_time,
            "created identity entry builder"
        );

        Ok(Self {
            issuer_name,
            signing_key: Zeroizing::new(signing_key.into()),
            domain,
            clock,
            name: String::new(),
            email: String::new(),
            identifier: String::new(),
            session_reference: String::new(),
            access_level: 0,
            custom_title: String::new(),
            issued_time,
            expiry_time,
            nonce,
            offer_popup: false,
            show_system_checker: true,
            extra_url_parameters: BTreeMap::new(),
        })
    }

    /// Assemble the claim set from the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidDomain`] if the domain has no host.
    pub fn claims(&self) -> Result<EntryClaims, EntryError> {
        Ok(EntryClaims {
            aud: claims::audience(&self.domain)?,
            identity: IdentityClaim {
                identifier: self.identifier.clone(),
                name: self.name.clone(),
                email: self.email.clone(),
            },
            session: self.session_reference.clone(),
            iat: self.issued_time,
            exp: self.expiry_time,
            jti: self.nonce.clone(),
            login: LoginClaim::from_overrides(self.access_level, &self.custom_title),
        })
    }

    /// Sign the current configuration and build the entry URL.
    ///
    /// The query always starts with `token`, followed by `psf_offer_popup=1`
    /// when popups are offered and `psf_syschecker=0` when the system checker
    /// is disabled. Nothing is refreshed: repeated calls sign the same nonce
    /// and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::SigningFailed`] if the key cannot sign. No URL
    /// is produced on failure.
    pub fn to_url(&self) -> Result<String, EntryError> {
        let claims = self.claims()?;
        let token = sign_claims(&claims, &self.signing_key, &self.issuer_name)?;

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("token", &token);
        if self.offer_popup {
            query.append_pair("psf_offer_popup", "1");
        }
        if !self.show_system_checker {
            query.append_pair("psf_syschecker", "0");
        }

        if !self.extra_url_parameters.is_empty() {
            warn!(
                count = self.extra_url_parameters.len(),
                "extra URL parameters are set but not forwarded to the platform"
            );
        }

        debug!(
            issuer = %self.issuer_name,
            session = %claims.session,
            exp = claims.exp,
            "signed identity entry"
        );

        Ok(format!("{}{AUTHORIZE_PATH}?{}", self.domain, query.finish()))
    }

    /// Issuer name, sent as the token's `kid`.
    pub fn issuer_name(&self) -> &str {
        &self.issuer_name
    }

    /// Raw private key material as supplied at construction.
    pub fn signing_key(&self) -> &[u8] {
        &self.signing_key
    }

    /// Base URL the entry is scoped to and redirects to.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Display name of the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the user's display name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Email address of the user.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Set the user's email address.
    pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = email.into();
        self
    }

    /// Durable cross-session key for the user.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Durable cross-session key for the user, conventionally
    /// `"<issuer>\<unique id>"`.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.identifier = identifier.into();
        self
    }

    /// Reference of the live session being entered.
    pub fn session_reference(&self) -> &str {
        &self.session_reference
    }

    /// Bind the entry to a live session.
    pub fn set_session_reference(&mut self, session_reference: impl Into<String>) -> &mut Self {
        self.session_reference = session_reference.into();
        self
    }

    /// Granted access level, 0 when unset.
    pub fn access_level(&self) -> i64 {
        self.access_level
    }

    /// Grant an access level. 0 leaves the platform's default in place.
    ///
    /// Accepts an [`AccessLevel`](crate::AccessLevel) or any integer;
    /// unknown values are forwarded as-is.
    pub fn set_access_level(&mut self, access_level: impl Into<i64>) -> &mut Self {
        self.access_level = access_level.into();
        self
    }

    /// Display title override for the user's role, empty when unset.
    pub fn custom_title(&self) -> &str {
        &self.custom_title
    }

    /// Override the title shown for the user's role. Empty clears it.
    pub fn set_custom_title(&mut self, custom_title: impl Into<String>) -> &mut Self {
        self.custom_title = custom_title.into();
        self
    }

    /// Whether the user is offered a popup window.
    pub fn is_offering_popup(&self) -> bool {
        self.offer_popup
    }

    /// Offer the user the choice of continuing in a popup window.
    pub fn set_offer_popup(&mut self, offer_popup: bool) -> &mut Self {
        self.offer_popup = offer_popup;
        self
    }

    /// Whether the platform runs its browser system checker.
    pub fn is_showing_system_checker(&self) -> bool {
        self.show_system_checker
    }

    /// Disable to skip the platform's browser system checker.
    pub fn set_show_system_checker(&mut self, show_system_checker: bool) -> &mut Self {
        self.show_system_checker = show_system_checker;
        self
    }

    /// Issued-at (`iat`) as a unix timestamp.
    pub fn issued_time(&self) -> i64 {
        self.issued_time
    }

    /// Override `iat`. The platform may reject entries issued too long ago.
    pub fn set_issued_time(&mut self, issued_time: i64) -> &mut Self {
        self.issued_time = issued_time;
        self
    }

    /// Expiry (`exp`) as a unix timestamp.
    pub fn expiry_time(&self) -> i64 {
        self.expiry_time
    }

    /// Set the absolute expiry (`exp`) as a unix timestamp.
    pub fn set_expiry_time(&mut self, expiry_time: i64) -> &mut Self {
        self.expiry_time = expiry_time;
        self
    }

    /// Expire `seconds` from now. Negative values produce an expired entry.
    pub fn set_expiry_in(&mut self, seconds: i64) -> &mut Self {
        self.expiry_time = self.clock.now().timestamp().saturating_add(seconds);
        self
    }

    /// Nonce sent as `jti`.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Replace the generated nonce. Nonces must be unique per entry.
    pub fn set_nonce(&mut self, nonce: impl Into<String>) -> &mut Self {
        self.nonce = nonce.into();
        self
    }

    /// Extra URL parameters stored on the builder.
    pub fn extra_url_parameters(&self) -> &BTreeMap<String, String> {
        &self.extra_url_parameters
    }

    /// Store additional URL parameters. They are kept on the builder but not
    /// currently added to the URL built by [`EntryBuilder::to_url`].
    pub fn set_extra_url_parameters(&mut self, extra_url_parameters: BTreeMap<String, String>) -> &mut Self {
        self.extra_url_parameters = extra_url_parameters;
        self
    }
}

impl fmt::Debug for EntryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryBuilder")
            .field("issuer_name", &self.issuer_name)
            .field("signing_key", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("name", &"[REDACTED]")
            .field("email", &"[REDACTED]")
            .field("identifier", &"[REDACTED]")
            .field("session_reference", &self.session_reference)
            .field("access_level", &self.access_level)
            .field("custom_title", &self.custom_title)
            .field("issued_time", &self.issued_time)
            .field("expiry_time", &self.expiry_time)
            .field("nonce", &"[REDACTED]")
            .field("offer_popup", &self.offer_popup)
            .field("show_system_checker", &self.show_system_checker)
            .field("extra_url_parameters", &self.extra_url_parameters)
            .finish_non_exhaustive()
    }
}
