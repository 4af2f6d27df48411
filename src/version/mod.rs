//! Three-component version identifiers for installed artifacts.
//!
//! A [`Version`] is `major.minor.sub_minor`, each a `u16`. The same textual
//! form is used for display and for the on-disk version record, so
//! [`Version::to_string`] is the only formatter and never diverges from what
//! [`Version::parse`] accepts.
//!
//! # Comparison
//!
//! Versions are compared for *difference only*. There is deliberately no
//! ordering: the launcher installs whatever the server publishes, so a
//! downgrade on the server is rolled out exactly like an upgrade.
//!
//! # Soft-fail parsing
//!
//! [`Version::parse`] never fails. Text that is not exactly three
//! dot-separated `u16` components yields [`Version::ZERO`], the same value
//! used as the "nothing installed / nothing fetched" sentinel. The parse
//! failure is logged so the two cases can be told apart in traces.
//! [`Version::try_parse`] exposes the strict form.
//!
//! ```rust
//! use alaunch_cli::version::Version;
//!
//! let local = Version::parse("1.2.3");
//! let remote = Version::parse("1.3.0\n");
//! assert!(remote.is_different_from(&local));
//! assert_eq!(remote.to_string(), "1.3.0");
//!
//! assert_eq!(Version::parse("1.2"), Version::ZERO);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Why a version string was rejected by [`Version::try_parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The text did not split into exactly three components.
    #[error("expected 3 dot-separated components in '{text}', found {found}")]
    ComponentCount {
        /// The rejected text
        text: String,
        /// Number of components found
        found: usize,
    },

    /// A component was not a non-negative 16-bit integer.
    #[error("invalid version component '{component}' in '{text}'")]
    InvalidComponent {
        /// The rejected text
        text: String,
        /// The offending component
        component: String,
    },
}

/// An immutable `major.minor.sub_minor` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    major: u16,
    minor: u16,
    sub_minor: u16,
}

impl Version {
    /// The `0.0.0` sentinel for "no version determined".
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Build a version from its components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, sub_minor: u16) -> Self {
        Self {
            major,
            minor,
            sub_minor,
        }
    }

    /// Parse `text`, falling back to [`Version::ZERO`] when it is malformed.
    ///
    /// Leading and trailing whitespace is ignored, so a version record
    /// written with a trailing newline still parses.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match Self::try_parse(text) {
            Ok(version) => version,
            Err(e) => {
                warn!("Treating malformed version as {}: {}", Self::ZERO, e);
                Self::ZERO
            }
        }
    }

    /// Parse `text` strictly.
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError`] if `text` does not have exactly three
    /// components or any component is not a `u16`.
    pub fn try_parse(text: &str) -> Result<Self, VersionParseError> {
        let trimmed = text.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionParseError::ComponentCount {
                text: trimmed.to_string(),
                found: parts.len(),
            });
        }

        let component = |part: &str| -> Result<u16, VersionParseError> {
            part.trim().parse::<u16>().map_err(|_| VersionParseError::InvalidComponent {
                text: trimmed.to_string(),
                component: part.to_string(),
            })
        };

        Ok(Self::new(component(parts[0])?, component(parts[1])?, component(parts[2])?))
    }

    /// `true` if any component differs from `other`.
    #[must_use]
    pub fn is_different_from(&self, other: &Self) -> bool {
        self.major != other.major || self.minor != other.minor || self.sub_minor != other.sub_minor
    }

    /// Whether this is the `0.0.0` sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        !self.is_different_from(&Self::ZERO)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.sub_minor)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::try_parse(&text).map_err(serde::de::Error::custom)
    }
}
