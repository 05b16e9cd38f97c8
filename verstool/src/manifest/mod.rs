//! Version expressions and manifest lookup.
//!
//! A version expression names where a project's version tuple lives:
//! a TOML manifest path, optionally followed by a colon and the key
//! holding the version (`"verstool.toml"`, `"Cargo.toml:package.metadata.version-tuple"`).
//! When no key is given, `version` is assumed.
//!
//! The version value may be written in two forms:
//!
//! ```toml
//! version = [1, 3, 0, "dev", 0]   # tuple form, 2 to 5 elements
//! version = "1.3.0.dev"           # dotted string form
//! ```
//!
//! [`expand`] is the build-integration hook: values carrying the
//! `:verstool:` magic prefix are resolved against their manifest and
//! replaced with the formatted version string, enriched with VCS
//! revision data rooted at the manifest's directory. Values without the
//! prefix are not ours to handle and pass through untouched.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::version::{format_version, Version, VersionError};

/// Magic prefix marking a value as a version expression.
pub const MAGIC_PREFIX: &str = ":verstool:";

/// Key looked up when the expression names none.
pub const DEFAULT_KEY: &str = "version";

/// Errors produced while resolving a version expression.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The expression itself is malformed.
    #[error("invalid version expression '{0}'")]
    BadExpression(String),

    /// The manifest file could not be read.
    #[error("unable to read manifest {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest is not valid TOML.
    #[error("unable to parse manifest {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The version key is absent from the manifest.
    #[error("unable to access '{key}' in {path}")]
    KeyNotFound { key: String, path: PathBuf },

    /// The value under the key is not a usable version.
    #[error("'{key}' in {path} is not a version value: {source}")]
    BadValue {
        key: String,
        path: PathBuf,
        source: VersionError,
    },

    /// The value under the key has a TOML type we cannot interpret.
    #[error("'{key}' in {path} must be a string or an array of 2 to 5 elements")]
    WrongType { key: String, path: PathBuf },
}

/// A parsed version expression: manifest path plus lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionExpr {
    /// Path to the TOML manifest.
    pub manifest: PathBuf,

    /// Dotted key under which the version value lives; `None` when the
    /// expression named no key.
    pub key: Option<String>,
}

fn expr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Path up to the first colon, optional (possibly empty) key after it.
    RE.get_or_init(|| Regex::new(r"^(?P<path>[^:]+)(?::(?P<key>.*))?$").unwrap())
}

impl VersionExpr {
    /// Parse an expression of the form `path` or `path:key`.
    ///
    /// A trailing colon with nothing after it is treated the same as no
    /// key at all.
    ///
    /// # Example
    ///
    /// ```
    /// use verstool::manifest::VersionExpr;
    ///
    /// let expr = VersionExpr::parse("Cargo.toml:package.version").unwrap();
    /// assert_eq!(expr.key(), "package.version");
    ///
    /// let expr = VersionExpr::parse("verstool.toml").unwrap();
    /// assert_eq!(expr.key(), "version");
    /// ```
    pub fn parse(s: &str) -> Result<Self, ManifestError> {
        let captures = expr_regex()
            .captures(s)
            .ok_or_else(|| ManifestError::BadExpression(s.to_string()))?;

        let manifest = PathBuf::from(&captures["path"]);
        let key = captures
            .name("key")
            .map(|m| m.as_str())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self { manifest, key })
    }

    /// The lookup key: the named one, or [`DEFAULT_KEY`].
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(DEFAULT_KEY)
    }

    /// The directory containing the manifest, used as the source tree
    /// for VCS lookup.
    pub fn source_tree(&self) -> &Path {
        self.manifest.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."))
    }
}

/// Load the manifest named by `expr` and extract its version.
///
/// Returns the version together with the manifest's directory, which is
/// the natural root for VCS revision lookup.
pub fn resolve(expr: &VersionExpr) -> Result<(Version, PathBuf), ManifestError> {
    let text = fs::read_to_string(&expr.manifest).map_err(|source| ManifestError::ReadFailed {
        path: expr.manifest.clone(),
        source,
    })?;
    let doc: toml::Value = toml::from_str(&text).map_err(|source| ManifestError::ParseFailed {
        path: expr.manifest.clone(),
        source,
    })?;

    let value = lookup(&doc, expr.key()).ok_or_else(|| ManifestError::KeyNotFound {
        key: expr.key().to_string(),
        path: expr.manifest.clone(),
    })?;

    let version = interpret(value, expr)?;
    debug!(
        manifest = %expr.manifest.display(),
        key = %expr.key(),
        %version,
        "resolved version expression"
    );
    Ok((version, expr.source_tree().to_path_buf()))
}

/// Run the manifest hook on a raw value.
///
/// Values without the [`MAGIC_PREFIX`] return `Ok(None)`; prefixed
/// values are resolved and formatted with VCS enrichment.
pub fn expand(value: &str) -> Result<Option<String>, ManifestError> {
    let Some(rest) = value.strip_prefix(MAGIC_PREFIX) else {
        return Ok(None);
    };
    let expr = VersionExpr::parse(rest)?;
    let (version, tree) = resolve(&expr)?;
    Ok(Some(format_version(&version, Some(&tree))))
}

/// Traverse the document along a dotted key.
fn lookup<'a>(doc: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = doc;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Interpret a TOML value as a version: tuple form or dotted string.
fn interpret(value: &toml::Value, expr: &VersionExpr) -> Result<Version, ManifestError> {
    let bad_value = |source| ManifestError::BadValue {
        key: expr.key().to_string(),
        path: expr.manifest.clone(),
        source,
    };
    let wrong_type = || ManifestError::WrongType {
        key: expr.key().to_string(),
        path: expr.manifest.clone(),
    };

    match value {
        toml::Value::String(s) => s.parse::<Version>().map_err(bad_value),
        toml::Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    toml::Value::Integer(n) => parts.push(n.to_string()),
                    toml::Value::String(s) => parts.push(s.clone()),
                    _ => return Err(wrong_type()),
                }
            }
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            Version::from_parts(&refs).map_err(bad_value)
        }
        _ => Err(wrong_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ReleaseLevel;
    use std::io::Write;

    fn write_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verstool.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_expression_with_key() {
        let expr = VersionExpr::parse("pkg/Cargo.toml:package.metadata.version").unwrap();
        assert_eq!(expr.manifest, PathBuf::from("pkg/Cargo.toml"));
        assert_eq!(expr.key, Some("package.metadata.version".to_string()));
        assert_eq!(expr.key(), "package.metadata.version");
    }

    #[test]
    fn test_parse_expression_default_key() {
        let expr = VersionExpr::parse("verstool.toml").unwrap();
        assert_eq!(expr.key, None);
        assert_eq!(expr.key(), DEFAULT_KEY);
    }

    #[test]
    fn test_parse_expression_trailing_colon_defaults_key() {
        // An empty key after the colon means "use the default".
        let expr = VersionExpr::parse("verstool.toml:").unwrap();
        assert_eq!(expr.manifest, PathBuf::from("verstool.toml"));
        assert_eq!(expr.key, None);
        assert_eq!(expr.key(), DEFAULT_KEY);
    }

    #[test]
    fn test_parse_expression_rejects_empty() {
        assert!(VersionExpr::parse("").is_err());
        assert!(VersionExpr::parse(":key-without-path").is_err());
    }

    #[test]
    fn test_resolve_tuple_form() {
        let (_dir, path) = write_manifest("version = [1, 3, 0, \"dev\", 0]\n");
        let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();

        let (version, tree) = resolve(&expr).unwrap();
        assert_eq!(version.level, ReleaseLevel::Dev);
        assert_eq!(version.to_string(), "1.3.dev");
        assert_eq!(tree, path.parent().unwrap());
    }

    #[test]
    fn test_resolve_string_form() {
        let (_dir, path) = write_manifest("version = \"2.1.4\"\n");
        let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();

        let (version, _) = resolve(&expr).unwrap();
        assert_eq!(version, Version::final_release(2, 1, 4));
    }

    #[test]
    fn test_resolve_dotted_key() {
        let (_dir, path) = write_manifest(
            "[package.metadata]\nversion-tuple = [0, 9, 0, \"beta\", 2]\n",
        );
        let spec = format!("{}:package.metadata.version-tuple", path.display());
        let expr = VersionExpr::parse(&spec).unwrap();

        let (version, _) = resolve(&expr).unwrap();
        assert_eq!(version.to_string(), "0.9b2");
    }

    #[test]
    fn test_resolve_missing_key() {
        let (_dir, path) = write_manifest("name = \"demo\"\n");
        let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();

        let err = resolve(&expr).unwrap_err();
        assert!(matches!(err, ManifestError::KeyNotFound { .. }));
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("absent.toml");
        let expr = VersionExpr::parse(spec.to_str().unwrap()).unwrap();

        let err = resolve(&expr).unwrap_err();
        assert!(matches!(err, ManifestError::ReadFailed { .. }));
    }

    #[test]
    fn test_resolve_rejects_bad_tuple() {
        let (_dir, path) = write_manifest("version = [1, 3, 0, \"alpha\", 0]\n");
        let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();

        let err = resolve(&expr).unwrap_err();
        assert!(matches!(err, ManifestError::BadValue { .. }));
    }

    #[test]
    fn test_resolve_rejects_wrong_type() {
        let (_dir, path) = write_manifest("version = 7\n");
        let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();

        let err = resolve(&expr).unwrap_err();
        assert!(matches!(err, ManifestError::WrongType { .. }));
    }

    #[test]
    fn test_expand_passes_through_plain_values() {
        assert_eq!(expand("1.2.3").unwrap(), None);
        assert_eq!(expand("").unwrap(), None);
    }

    #[test]
    fn test_expand_resolves_prefixed_values() {
        let (_dir, path) = write_manifest("version = [1, 2, 3]\n");
        let value = format!("{}{}", MAGIC_PREFIX, path.display());

        let expanded = expand(&value).unwrap();
        assert_eq!(expanded, Some("1.2.3".to_string()));
    }
}
