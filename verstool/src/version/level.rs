//! Release level component of a version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::core::VersionError;

/// Release level of a version.
///
/// The ordering is deliberate: a development snapshot precedes any
/// numbered pre-release of the same version triple, and a final release
/// sorts after everything else. Deriving `Ord` on the declaration order
/// gives `Dev < Alpha < Beta < Candidate < Final`.
///
/// # Example
///
/// ```
/// use verstool::version::ReleaseLevel;
///
/// assert!(ReleaseLevel::Dev < ReleaseLevel::Alpha);
/// assert!(ReleaseLevel::Candidate < ReleaseLevel::Final);
/// assert_eq!("beta".parse::<ReleaseLevel>().unwrap(), ReleaseLevel::Beta);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLevel {
    /// Development snapshot, rendered as a `.dev` suffix.
    Dev,
    /// Alpha pre-release, rendered as `a{serial}`.
    Alpha,
    /// Beta pre-release, rendered as `b{serial}`.
    Beta,
    /// Release candidate, rendered as `c{serial}`.
    Candidate,
    /// Final release, no suffix.
    Final,
}

impl ReleaseLevel {
    /// All levels in sort order.
    pub fn all() -> &'static [ReleaseLevel] {
        &[
            ReleaseLevel::Dev,
            ReleaseLevel::Alpha,
            ReleaseLevel::Beta,
            ReleaseLevel::Candidate,
            ReleaseLevel::Final,
        ]
    }

    /// Lowercase name of the level (`"dev"`, `"alpha"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            ReleaseLevel::Dev => "dev",
            ReleaseLevel::Alpha => "alpha",
            ReleaseLevel::Beta => "beta",
            ReleaseLevel::Candidate => "candidate",
            ReleaseLevel::Final => "final",
        }
    }

    /// Single-letter formatting token for pre-release levels.
    ///
    /// Returns `None` for `Dev` and `Final`, which use different
    /// rendering rules.
    pub fn token(&self) -> Option<char> {
        match self {
            ReleaseLevel::Alpha => Some('a'),
            ReleaseLevel::Beta => Some('b'),
            ReleaseLevel::Candidate => Some('c'),
            ReleaseLevel::Dev | ReleaseLevel::Final => None,
        }
    }

    /// Whether this level requires a nonzero serial number.
    pub fn requires_serial(&self) -> bool {
        matches!(
            self,
            ReleaseLevel::Alpha | ReleaseLevel::Beta | ReleaseLevel::Candidate
        )
    }
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReleaseLevel {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(ReleaseLevel::Dev),
            "alpha" => Ok(ReleaseLevel::Alpha),
            "beta" => Ok(ReleaseLevel::Beta),
            "candidate" => Ok(ReleaseLevel::Candidate),
            "final" => Ok(ReleaseLevel::Final),
            other => Err(VersionError::InvalidLevel(other.to_string())),
        }
    }
}
