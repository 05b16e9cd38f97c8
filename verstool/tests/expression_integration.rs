//! Integration tests for version expression resolution.
//!
//! These tests verify the complete expression flow including:
//! - expression parsing → manifest lookup → formatted version string
//! - the `:verstool:` expansion hook
//! - build-env stamping against a temp source tree
//!
//! Run with: `cargo test --test expression_integration`

use std::fs;
use std::path::PathBuf;

use verstool::manifest::{self, VersionExpr, MAGIC_PREFIX};
use verstool::version::{format_version, ReleaseLevel};
use verstool::{stamp, Version};

/// Write a manifest into a fresh temp dir and return both.
fn project_with_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verstool.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn resolves_tuple_manifest_to_formatted_string() {
    let (_dir, path) = project_with_manifest("version = [1, 9, 1, \"final\", 0]\n");

    let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();
    let (version, tree) = manifest::resolve(&expr).unwrap();

    assert_eq!(version, Version::final_release(1, 9, 1));
    assert_eq!(format_version(&version, Some(&tree)), "1.9.1");
}

#[test]
fn resolves_nested_key_in_cargo_style_manifest() {
    let (_dir, path) = project_with_manifest(
        "[package]\n\
         name = \"demo\"\n\
         version = \"0.1.0\"\n\
         \n\
         [package.metadata.verstool]\n\
         version = [0, 2, 0, \"candidate\", 1]\n",
    );

    let spec = format!("{}:package.metadata.verstool.version", path.display());
    let expr = VersionExpr::parse(&spec).unwrap();
    let (version, _) = manifest::resolve(&expr).unwrap();

    assert_eq!(version.level, ReleaseLevel::Candidate);
    assert_eq!(version.to_string(), "0.2c1");
}

#[test]
fn dev_version_in_unversioned_tree_formats_bare_dev() {
    let (_dir, path) = project_with_manifest("version = \"1.3.0.dev\"\n");

    let value = format!("{}{}", MAGIC_PREFIX, path.display());
    let expanded = manifest::expand(&value).unwrap();

    // The temp project has no VCS control directory, so no revision
    // suffix is available.
    assert_eq!(expanded, Some("1.3.dev".to_string()));
}

#[test]
fn expand_leaves_plain_version_strings_alone() {
    assert_eq!(manifest::expand("0.4.2").unwrap(), None);
}

#[test]
fn expand_reports_missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let value = format!("{}{}", MAGIC_PREFIX, dir.path().join("gone.toml").display());
    assert!(manifest::expand(&value).is_err());
}

#[test]
fn stamping_matches_resolved_version() {
    let (dir, path) = project_with_manifest("version = [2, 5, 0, \"beta\", 3]\n");

    let expr = VersionExpr::parse(path.to_str().unwrap()).unwrap();
    let (version, _) = manifest::resolve(&expr).unwrap();

    let mut out = Vec::new();
    stamp::emit_build_env(&mut out, &version, dir.path()).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("cargo:rustc-env=VERSTOOL_VERSION=2.5b3"));
}
