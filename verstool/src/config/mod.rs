//! Configuration file handling.
//!
//! Settings live in an ini file at `<config dir>/verstool/config.ini`
//! (e.g. `~/.config/verstool/config.ini` on Linux):
//!
//! ```ini
//! [vcs]
//! backends = git,hg,bzr
//!
//! [manifest]
//! default_key = version
//! ```
//!
//! [`ConfigFile`] is the typed model; the file is regenerated from it on
//! save, so unknown keys are dropped. [`ConfigKey`] enumerates the
//! recognized keys for the CLI's `config get`/`set`/`list` commands.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::info;

use crate::vcs::{VcsKind, DEFAULT_BACKENDS};

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("config file I/O failed at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// The config file is not valid ini.
    #[error("unable to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A value does not parse for its key.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Path of the user configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verstool")
        .join("config.ini")
}

/// VCS lookup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsConfig {
    /// Backend probe order.
    pub backends: Vec<VcsKind>,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            backends: DEFAULT_BACKENDS.to_vec(),
        }
    }
}

/// Manifest resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
    /// Key looked up when a version expression names none.
    pub default_key: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            default_key: crate::manifest::DEFAULT_KEY.to_string(),
        }
    }
}

/// Typed model of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    /// `[vcs]` section.
    pub vcs: VcsConfig,

    /// `[manifest]` section.
    pub manifest: ManifestConfig,
}

impl ConfigFile {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(raw) = ini.get_from(Some("vcs"), "backends") {
            config.vcs.backends = parse_backends(raw).map_err(|reason| {
                ConfigError::InvalidValue {
                    key: "vcs.backends",
                    reason,
                }
            })?;
        }
        if let Some(raw) = ini.get_from(Some("manifest"), "default_key") {
            config.manifest.default_key = raw.to_string();
        }

        Ok(config)
    }

    /// Save to the default location, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("vcs"))
            .set("backends", format_backends(&self.vcs.backends));
        ini.with_section(Some("manifest"))
            .set("default_key", self.manifest.default_key.clone());

        ini.write_to_file(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

fn parse_backends(raw: &str) -> Result<Vec<VcsKind>, String> {
    let backends: Vec<VcsKind> = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()?;
    if backends.is_empty() {
        return Err("at least one backend is required".to_string());
    }
    Ok(backends)
}

fn format_backends(backends: &[VcsKind]) -> String {
    backends
        .iter()
        .map(VcsKind::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Registry of recognized configuration keys.
///
/// Gives the CLI a stable `section.key` vocabulary for `config get`,
/// `config set` and `config list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `vcs.backends` — comma-separated backend probe order.
    VcsBackends,
    /// `manifest.default_key` — default version key in manifests.
    ManifestDefaultKey,
}

impl ConfigKey {
    /// All keys, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::VcsBackends, ConfigKey::ManifestDefaultKey]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::VcsBackends => "vcs.backends",
            ConfigKey::ManifestDefaultKey => "manifest.default_key",
        }
    }

    /// Section the key belongs to.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::VcsBackends => "vcs",
            ConfigKey::ManifestDefaultKey => "manifest",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::VcsBackends => "backends",
            ConfigKey::ManifestDefaultKey => "default_key",
        }
    }

    /// Read the current value as a display string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::VcsBackends => format_backends(&config.vcs.backends),
            ConfigKey::ManifestDefaultKey => config.manifest.default_key.clone(),
        }
    }

    /// Parse and store a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::VcsBackends => {
                config.vcs.backends =
                    parse_backends(value).map_err(|reason| ConfigError::InvalidValue {
                        key: self.name(),
                        reason,
                    })?;
            }
            ConfigKey::ManifestDefaultKey => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: self.name(),
                        reason: "key must not be empty".to_string(),
                    });
                }
                config.manifest.default_key = value.trim().to_string();
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(
            config.vcs.backends,
            vec![VcsKind::Git, VcsKind::Hg, VcsKind::Bzr]
        );
        assert_eq!(config.manifest.default_key, "version");
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.vcs.backends = vec![VcsKind::Hg, VcsKind::Git];
        config.manifest.default_key = "project.version".to_string();
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_unknown_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[vcs]\nbackends = git,svn\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("svn"));
    }

    #[test]
    fn test_config_key_parse() {
        assert_eq!(
            "vcs.backends".parse::<ConfigKey>().unwrap(),
            ConfigKey::VcsBackends
        );
        assert!("vcs.unknown".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_config_key_set_backends() {
        let mut config = ConfigFile::default();
        ConfigKey::VcsBackends.set(&mut config, "bzr,git").unwrap();
        assert_eq!(config.vcs.backends, vec![VcsKind::Bzr, VcsKind::Git]);

        assert!(ConfigKey::VcsBackends.set(&mut config, "").is_err());
        assert!(ConfigKey::VcsBackends.set(&mut config, "cvs").is_err());
    }

    #[test]
    fn test_config_key_set_default_key() {
        let mut config = ConfigFile::default();
        ConfigKey::ManifestDefaultKey
            .set(&mut config, "tool.version")
            .unwrap();
        assert_eq!(config.manifest.default_key, "tool.version");

        assert!(ConfigKey::ManifestDefaultKey.set(&mut config, "  ").is_err());
    }

    #[test]
    fn test_config_key_roundtrip_names() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
            assert_eq!(key.name(), format!("{}.{}", key.section(), key.key_name()));
        }
    }
}
