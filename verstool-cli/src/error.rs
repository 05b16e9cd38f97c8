//! CLI error type.

use thiserror::Error;
use verstool::config::ConfigError;
use verstool::manifest::ManifestError;
use verstool::version::VersionError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Version parsing or validation failed.
    #[error("{0}")]
    Version(#[from] VersionError),

    /// Expression resolution failed.
    #[error("{0}")]
    Manifest(#[from] ManifestError),

    /// Configuration handling failed.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Configuration key is not recognized.
    #[error("unknown configuration key '{0}'. Use 'verstool config list' to see available keys")]
    UnknownConfigKey(String),

    /// No version control system claimed the source tree.
    #[error("no version control system found for {0}")]
    NoVcs(String),

    /// Output serialization or I/O failure.
    #[error("output failed: {0}")]
    Output(String),
}
