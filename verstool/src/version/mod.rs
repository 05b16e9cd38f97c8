//! Project version types and parsing.
//!
//! This module provides the core data structures for verstool's version
//! handling: the five-component [`Version`] tuple, its [`ReleaseLevel`],
//! and the formatting entry points.
//!
//! # Overview
//!
//! A verstool version has the same logical shape as an interpreter's
//! `version_info`: `(major, minor, micro, level, serial)`. The string
//! rendering is not a direct concatenation of the components; trailing
//! zero components and the `final` level are left out to produce a
//! natural, human-friendly version string:
//!
//! | Components                  | Rendered |
//! |-----------------------------|----------|
//! | `(1, 2, 0, Final, 0)`       | `1.2`    |
//! | `(1, 2, 3, Final, 0)`       | `1.2.3`  |
//! | `(1, 3, 0, Alpha, 1)`       | `1.3a1`  |
//! | `(1, 3, 0, Beta, 1)`        | `1.3b1`  |
//! | `(1, 3, 0, Candidate, 1)`   | `1.3c1`  |
//! | `(1, 3, 0, Dev, 0)`         | `1.3.dev`|
//!
//! Development versions can additionally carry a revision suffix taken
//! from the version control system that holds the source tree; see
//! [`format_version`] and the [`crate::vcs`] module.

mod core;
mod format;
mod level;

pub use core::{Version, VersionError};
pub use format::{format_version, format_version_with};
pub use level::ReleaseLevel;
