//! CLI command implementations.
//!
//! One module per subcommand; each exposes a `run` function taking its
//! clap-parsed arguments and returning `Result<(), CliError>`.

pub mod config;
pub mod emit;
pub mod expand;
pub mod format;
pub mod query;

use std::path::Path;

use tracing::debug;
use verstool::config::ConfigFile;
use verstool::manifest::{self, VersionExpr};
use verstool::Version;

use crate::error::CliError;

/// Load config or fall back to defaults.
pub fn load_config() -> ConfigFile {
    ConfigFile::load().unwrap_or_else(|err| {
        debug!(error = %err, "config load failed, using defaults");
        ConfigFile::default()
    })
}

/// Resolve a CLI version argument.
///
/// Accepts either a bare dotted version string (`1.3.0.dev`) or a
/// manifest expression (`verstool.toml`, `Cargo.toml:package.metadata.version`).
/// Returns the version and, for expressions, the manifest's directory
/// as the source tree.
pub fn resolve_version_arg(
    arg: &str,
    config: &ConfigFile,
) -> Result<(Version, Option<std::path::PathBuf>), CliError> {
    // A bare version string has no path separator and parses directly.
    if !arg.contains(std::path::MAIN_SEPARATOR) && !Path::new(arg).exists() {
        if let Ok(version) = arg.parse::<Version>() {
            return Ok((version, None));
        }
    }

    let mut expr = VersionExpr::parse(arg)?;
    // The configured default only applies when the expression named no
    // key; an explicit key always wins.
    if expr.key.is_none() {
        expr.key = Some(config.manifest.default_key.clone());
    }
    debug!(manifest = %expr.manifest.display(), key = %expr.key(), "resolving version expression");
    let (version, tree) = manifest::resolve(&expr)?;
    Ok((version, Some(tree)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_version_arg_bare_string() {
        let config = ConfigFile::default();
        let (version, tree) = resolve_version_arg("1.2.3.dev", &config).unwrap();
        assert_eq!(version.to_string(), "1.2.3.dev");
        assert!(tree.is_none());
    }

    #[test]
    fn test_resolve_version_arg_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verstool.toml");
        fs::write(&path, "version = [3, 1]\n").unwrap();

        let config = ConfigFile::default();
        let (version, tree) =
            resolve_version_arg(path.to_str().unwrap(), &config).unwrap();
        assert_eq!(version.to_string(), "3.1");
        assert_eq!(tree.unwrap(), dir.path());
    }

    #[test]
    fn test_resolve_version_arg_honors_configured_default_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verstool.toml");
        fs::write(&path, "[project]\nrelease = \"0.8.0\"\n").unwrap();

        let mut config = ConfigFile::default();
        config.manifest.default_key = "project.release".to_string();

        let (version, _) = resolve_version_arg(path.to_str().unwrap(), &config).unwrap();
        assert_eq!(version.to_string(), "0.8");
    }

    #[test]
    fn test_resolve_version_arg_explicit_key_beats_configured_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verstool.toml");
        fs::write(
            &path,
            "version = \"1.2.3\"\n\n[project]\nrelease = \"9.9.9\"\n",
        )
        .unwrap();

        let mut config = ConfigFile::default();
        config.manifest.default_key = "project.release".to_string();

        // Explicitly asking for `version` must not be rerouted to the
        // configured default key.
        let spec = format!("{}:version", path.display());
        let (version, _) = resolve_version_arg(&spec, &config).unwrap();
        assert_eq!(version.to_string(), "1.2.3");
    }
}
