//! Build-script stamping helpers.
//!
//! Emits `cargo:rustc-env` directives so a build script can bake the
//! formatted version and the source tree's revision data into the
//! compiled binary:
//!
//! ```no_run
//! use std::io;
//! use std::path::Path;
//!
//! let version: verstool::Version = "0.3.0.dev".parse().unwrap();
//! verstool::stamp::emit_build_env(&mut io::stdout(), &version, Path::new(".")).unwrap();
//! ```
//!
//! The consuming crate then reads the values with `env!`:
//! `env!("VERSTOOL_VERSION")`.

use std::io::{self, Write};
use std::path::Path;

use crate::vcs;
use crate::version::{format_version_with, Version};

/// Write `cargo:rustc-env` lines for `version` to `out`.
///
/// `VERSTOOL_VERSION` always appears, carrying the formatted version
/// string (revision-enriched for dev versions). When the source tree's
/// VCS answers, `VERSTOOL_VCS`, `VERSTOOL_REVNO` and, when known,
/// `VERSTOOL_BRANCH` follow.
pub fn emit_build_env(
    out: &mut impl Write,
    version: &Version,
    source_tree: &Path,
) -> io::Result<()> {
    let info = vcs::query(source_tree);
    let formatted = format_version_with(version, info.as_ref());

    writeln!(out, "cargo:rustc-env=VERSTOOL_VERSION={}", formatted)?;
    if let Some(info) = info {
        writeln!(out, "cargo:rustc-env=VERSTOOL_VCS={}", info.kind)?;
        writeln!(out, "cargo:rustc-env=VERSTOOL_REVNO={}", info.revno)?;
        if let Some(branch) = info.branch_nick {
            writeln!(out, "cargo:rustc-env=VERSTOOL_BRANCH={}", branch)?;
        }
    }
    Ok(())
}
