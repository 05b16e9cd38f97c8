//! Verstool - a single, useful project version
//!
//! This library defines a project version as a five-component tuple
//! `(major, minor, micro, level, serial)` and renders it as a natural
//! version string. Development versions are enriched with revision data
//! queried from the version control system holding the source tree, so
//! a snapshot build of `1.3` becomes `1.3.dev763fbe3` instead of an
//! anonymous `1.3.dev`.
//!
//! # Modules
//!
//! - [`version`] - the [`Version`] tuple, parsing and formatting
//! - [`vcs`] - git, mercurial and bazaar revision queries
//! - [`manifest`] - version expressions over TOML manifests and the
//!   `:verstool:` expansion hook
//! - [`stamp`] - `cargo:rustc-env` emission for build scripts
//! - [`config`] - the user configuration file

pub mod config;
pub mod manifest;
pub mod stamp;
pub mod vcs;
pub mod version;

pub use version::{format_version, ReleaseLevel, Version};
