//! Version control integration.
//!
//! This module answers one question: what revision is the source tree
//! at? Each supported system (git, mercurial, bazaar) gets a backend
//! that shells out to the corresponding tool and normalizes the answer
//! into a [`VcsInfo`].
//!
//! # Lookup behavior
//!
//! [`query`] walks from the given path up through its ancestors until a
//! control directory (`.git`, `.hg`, `.bzr`) is found, then runs that
//! backend. Detection misses and tool failures are logged at debug
//! level and skipped; a source tree that is not under version control
//! simply yields `None`. Callers must never fail because no VCS
//! answered.

mod bzr;
mod git;
mod hg;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use bzr::BzrBackend;
pub use git::GitBackend;
pub use hg::HgBackend;

/// Backend order used when no configuration overrides it.
pub const DEFAULT_BACKENDS: &[VcsKind] = &[VcsKind::Git, VcsKind::Hg, VcsKind::Bzr];

/// Errors produced when querying a version control tool.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The VCS tool could not be spawned (usually not installed).
    #[error("failed to run {tool}: {source}")]
    SpawnFailed { tool: &'static str, source: io::Error },

    /// The tool ran but reported failure.
    #[error("{tool} exited with {status}: {stderr}")]
    CommandFailed {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    /// The tool produced empty or undecodable output.
    #[error("unusable output from {tool}")]
    BadOutput { tool: &'static str },
}

/// Supported version control systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Hg,
    Bzr,
}

impl VcsKind {
    /// Name of the control directory that marks a source tree.
    pub fn control_dir(&self) -> &'static str {
        match self {
            VcsKind::Git => ".git",
            VcsKind::Hg => ".hg",
            VcsKind::Bzr => ".bzr",
        }
    }

    fn backend(&self) -> Box<dyn VcsBackend> {
        match self {
            VcsKind::Git => Box::new(GitBackend),
            VcsKind::Hg => Box::new(HgBackend),
            VcsKind::Bzr => Box::new(BzrBackend),
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VcsKind::Git => "git",
            VcsKind::Hg => "hg",
            VcsKind::Bzr => "bzr",
        };
        f.write_str(name)
    }
}

impl FromStr for VcsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "git" => Ok(VcsKind::Git),
            "hg" => Ok(VcsKind::Hg),
            "bzr" => Ok(VcsKind::Bzr),
            other => Err(format!("unknown VCS backend '{}'", other)),
        }
    }
}

/// Revision data exported by a version control backend.
///
/// For git, `revno` is the abbreviated 7-character commit id and
/// `commit_id` holds the full hex id. For mercurial and bazaar, `revno`
/// is the numeric branch revision and `commit_id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VcsInfo {
    /// Which system answered.
    pub kind: VcsKind,

    /// Revision identifier suitable for a `.dev` suffix.
    pub revno: String,

    /// Nickname of the current branch, when one is known.
    pub branch_nick: Option<String>,

    /// Full commit identifier, for systems that have one.
    pub commit_id: Option<String>,
}

/// A version control system backend.
///
/// Backends are cheap, stateless handles; `detect` is a pure filesystem
/// check and `query` shells out to the tool.
pub trait VcsBackend {
    /// Which system this backend drives.
    fn kind(&self) -> VcsKind;

    /// Whether `tree` is the root of a working tree for this system.
    fn detect(&self, tree: &Path) -> bool {
        tree.join(self.kind().control_dir()).exists()
    }

    /// Query revision data for the working tree rooted at `tree`.
    fn query(&self, tree: &Path) -> Result<VcsInfo, VcsError>;
}

/// Walk from `start` up through its ancestors looking for a control
/// directory, checking `kinds` in order at each level.
///
/// Returns the nearest ancestor that is a working tree root, together
/// with the system that claimed it.
pub fn find_source_tree_with(start: &Path, kinds: &[VcsKind]) -> Option<(VcsKind, PathBuf)> {
    for dir in start.ancestors() {
        for kind in kinds {
            if dir.join(kind.control_dir()).exists() {
                return Some((*kind, dir.to_path_buf()));
            }
        }
    }
    None
}

/// [`find_source_tree_with`] using the default backend order.
pub fn find_source_tree(start: &Path) -> Option<(VcsKind, PathBuf)> {
    find_source_tree_with(start, DEFAULT_BACKENDS)
}

/// Query revision data for the source tree containing `start`, honoring
/// a custom backend order.
///
/// Failures are logged at debug level and yield `None`.
pub fn query_with_backends(start: &Path, kinds: &[VcsKind]) -> Option<VcsInfo> {
    let (kind, root) = find_source_tree_with(start, kinds)?;
    match kind.backend().query(&root) {
        Ok(info) => Some(info),
        Err(err) => {
            debug!(
                vcs = %kind,
                tree = %root.display(),
                error = %err,
                "VCS query failed"
            );
            None
        }
    }
}

/// Query revision data for the source tree containing `start`.
pub fn query(start: &Path) -> Option<VcsInfo> {
    query_with_backends(start, DEFAULT_BACKENDS)
}

/// Run a VCS tool in `tree` and return its trimmed stdout.
///
/// Shared plumbing for the backends.
fn run_tool(tool: &'static str, args: &[&str], tree: &Path) -> Result<String, VcsError> {
    let output = Command::new(tool)
        .args(args)
        .current_dir(tree)
        .output()
        .map_err(|source| VcsError::SpawnFailed { tool, source })?;

    if !output.status.success() {
        return Err(VcsError::CommandFailed {
            tool,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        return Err(VcsError::BadOutput { tool });
    }
    Ok(stdout)
}
