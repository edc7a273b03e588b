//! Access tiers recognised by the live events platform.
//!
//! The builder forwards any integer as the `login.access` claim; this
//! enumeration only names the tiers the platform currently knows about.

use std::fmt;
use std::str::FromStr;

use crate::error::EntryError;

/// Ordered access tiers granted to a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessLevel {
    /// Can view the stream but cannot use chat or questions.
    Observer,
    /// Can view the stream and use every interactive feature.
    Participant,
    /// Participant plus host functions such as moderation.
    Host,
    /// Host plus the built-in presentation tools for the slide deck.
    Presenter,
}

impl AccessLevel {
    /// Every known tier, lowest first.
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Observer,
        AccessLevel::Participant,
        AccessLevel::Host,
        AccessLevel::Presenter,
    ];

    /// Numeric value carried in the `login.access` claim.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            AccessLevel::Observer => 10,
            AccessLevel::Participant => 50,
            AccessLevel::Host => 300,
            AccessLevel::Presenter => 700,
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AccessLevel::Observer => "observer",
            AccessLevel::Participant => "participant",
            AccessLevel::Host => "host",
            AccessLevel::Presenter => "presenter",
        }
    }

    /// Look up the tier with exactly this numeric value.
    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.value() == value)
    }
}

impl From<AccessLevel> for i64 {
    fn from(level: AccessLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccessLevel {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EntryError::InvalidAccessLevel {
                value: s.to_string(),
            })
    }
}

/// Parse an access level given either as a tier name or a raw integer.
///
/// Integers outside the known tiers are accepted unchanged so that new
/// platform tiers can be granted without a release of this crate.
pub fn parse_access_level(s: &str) -> Result<i64, EntryError> {
    if let Ok(value) = s.trim().parse::<i64>() {
        return Ok(value);
    }
    s.parse::<AccessLevel>().map(AccessLevel::value)
}
