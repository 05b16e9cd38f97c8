//! Core version tuple type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::level::ReleaseLevel;

/// Errors produced when constructing or parsing a version.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The release level name is not one of the accepted values.
    #[error("release level '{0}' is not permitted (expected dev, alpha, beta, candidate or final)")]
    InvalidLevel(String),

    /// A numeric component could not be parsed as a non-negative integer.
    #[error("invalid version component '{0}': expected a non-negative integer")]
    InvalidComponent(String),

    /// Alpha, beta and candidate releases must be numbered from 1.
    #[error("serial must be greater than zero for {0} releases")]
    ZeroSerial(ReleaseLevel),

    /// Wrong number of components for the tuple form.
    #[error("expected 2 to 5 version components, got {0}")]
    ComponentCount(usize),
}

/// Five-component project version.
///
/// A `Version` has the same logical components as an interpreter's
/// `version_info` tuple. Ordering follows field declaration order, so
/// comparing two versions behaves like comparing the underlying tuples,
/// with the release level ordered `dev < alpha < beta < candidate < final`.
///
/// # Example
///
/// ```
/// use verstool::version::{ReleaseLevel, Version};
///
/// let released = Version::final_release(1, 2, 3);
/// let beta = Version::new(1, 2, 3, ReleaseLevel::Beta, 1).unwrap();
///
/// assert!(beta < released);
/// assert_eq!(released.to_string(), "1.2.3");
/// assert_eq!(beta.to_string(), "1.2.3b1");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    /// Major version number.
    pub major: u32,

    /// Minor version number.
    pub minor: u32,

    /// Micro version number.
    pub micro: u32,

    /// Release level.
    pub level: ReleaseLevel,

    /// Serial number; nonzero only for alpha, beta and candidate releases.
    pub serial: u32,
}

impl Version {
    /// Create a new version.
    ///
    /// Rejects a zero serial for alpha, beta and candidate levels: a
    /// numbered pre-release starts at 1.
    ///
    /// # Example
    ///
    /// ```
    /// use verstool::version::{ReleaseLevel, Version};
    ///
    /// assert!(Version::new(1, 3, 0, ReleaseLevel::Alpha, 1).is_ok());
    /// assert!(Version::new(1, 3, 0, ReleaseLevel::Alpha, 0).is_err());
    /// ```
    pub fn new(
        major: u32,
        minor: u32,
        micro: u32,
        level: ReleaseLevel,
        serial: u32,
    ) -> Result<Self, VersionError> {
        if level.requires_serial() && serial == 0 {
            return Err(VersionError::ZeroSerial(level));
        }
        Ok(Self {
            major,
            minor,
            micro,
            level,
            serial,
        })
    }

    /// Create a final release version.
    pub fn final_release(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            level: ReleaseLevel::Final,
            serial: 0,
        }
    }

    /// Build a version from string components.
    ///
    /// Accepts two to five components; missing trailing components
    /// default to `micro = 0`, `level = final` and `serial = 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use verstool::version::{ReleaseLevel, Version};
    ///
    /// let v = Version::from_parts(&["1", "2", "3", "dev"]).unwrap();
    /// assert_eq!(v.micro, 3);
    /// assert_eq!(v.level, ReleaseLevel::Dev);
    /// ```
    pub fn from_parts(parts: &[&str]) -> Result<Self, VersionError> {
        if !(2..=5).contains(&parts.len()) {
            return Err(VersionError::ComponentCount(parts.len()));
        }
        let major = parse_component(parts[0])?;
        let minor = parse_component(parts[1])?;
        let micro = match parts.get(2) {
            Some(p) => parse_component(p)?,
            None => 0,
        };
        let level = match parts.get(3) {
            Some(p) => p.parse::<ReleaseLevel>()?,
            None => ReleaseLevel::Final,
        };
        let serial = match parts.get(4) {
            Some(p) => parse_component(p)?,
            None => 0,
        };
        Self::new(major, minor, micro, level, serial)
    }

    /// Whether this is a development snapshot.
    pub fn is_dev(&self) -> bool {
        self.level == ReleaseLevel::Dev
    }

    /// Whether this is a numbered pre-release (alpha, beta or candidate).
    pub fn is_prerelease(&self) -> bool {
        self.level.requires_serial()
    }
}

fn parse_component(s: &str) -> Result<u32, VersionError> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| VersionError::InvalidComponent(s.to_string()))
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parse a dotted component string such as `"1.2.3.dev"` or
    /// `"1.3.0.beta.2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        Self::from_parts(&parts)
    }
}

impl fmt::Display for Version {
    /// Render the natural version string.
    ///
    /// `major.minor` always appears; `.micro` only when micro is
    /// nonzero; pre-release levels append their token and serial; dev
    /// versions get a bare `.dev` suffix. Display never consults the
    /// version control system; use
    /// [`format_version`](super::format_version) for the enriched form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.micro != 0 {
            write!(f, ".{}", self.micro)?;
        }
        if let Some(token) = self.level.token() {
            write!(f, "{}{}", token, self.serial)?;
        }
        if self.level == ReleaseLevel::Dev {
            f.write_str(".dev")?;
        }
        Ok(())
    }
}
