//! Document format version and the compatibility gate.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// `MAJOR.MINOR` version of the configuration document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FormatVersion {
    /// Incompatible format revisions.
    pub major: u32,
    /// Additive format revisions.
    pub minor: u32,
}

/// Format version compiled into this decoder.
pub const SUPPORTED_VERSION: FormatVersion = FormatVersion::new(1, 0);

impl FormatVersion {
    /// Create a version from its two components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Reason a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError(&'static str);

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for FormatVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .trim()
            .split_once('.')
            .ok_or(ParseVersionError("expected MAJOR.MINOR"))?;
        let major = major
            .parse()
            .map_err(|_| ParseVersionError("major is not an unsigned integer"))?;
        let minor = minor
            .parse()
            .map_err(|_| ParseVersionError("minor is not an unsigned integer"))?;
        Ok(Self { major, minor })
    }
}

/// Rule used to accept or reject a document version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum VersionPolicy {
    /// Major must match; the document minor may not exceed the supported minor.
    #[default]
    ForwardCompatible,
    /// Major and minor must both match.
    Strict,
}

impl VersionPolicy {
    /// Returns `true` if a document declaring `found` is accepted by a decoder
    /// supporting `supported`.
    pub fn accepts(self, found: FormatVersion, supported: FormatVersion) -> bool {
        match self {
            VersionPolicy::ForwardCompatible => {
                found.major == supported.major && found.minor <= supported.minor
            }
            VersionPolicy::Strict => found == supported,
        }
    }
}

impl fmt::Display for VersionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPolicy::ForwardCompatible => f.write_str("forward-compatible"),
            VersionPolicy::Strict => f.write_str("strict"),
        }
    }
}
