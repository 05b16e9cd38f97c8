//! Version string formatting with VCS enrichment.
//!
//! [`Display`](std::fmt::Display) on [`Version`] renders the base string
//! and stays side-effect free. The functions here add the revision
//! suffix for development versions: when the source tree lives in a
//! recognized version control system, `.dev` becomes `.dev{revno}`,
//! e.g. `1.3.dev763fbe3` for a git tree or `1.3.dev54` for mercurial.

use std::path::Path;

use tracing::debug;

use crate::vcs::{self, VcsInfo};

use super::core::Version;

/// Format a version, enriching dev versions with VCS revision data.
///
/// For non-dev versions this is identical to the `Display` rendering.
/// For dev versions with a `source_tree`, the tree's version control
/// system is queried and, when one answers, its revision identifier is
/// appended to the `.dev` suffix. A missing or unrecognized VCS is never
/// an error; the bare `.dev` suffix is used instead.
///
/// # Example
///
/// ```
/// use verstool::version::{format_version, Version};
///
/// let v = Version::final_release(1, 2, 0);
/// assert_eq!(format_version(&v, None), "1.2");
/// ```
pub fn format_version(version: &Version, source_tree: Option<&Path>) -> String {
    let info = if version.is_dev() {
        source_tree.and_then(|tree| {
            let info = vcs::query(tree);
            if info.is_none() {
                debug!(tree = %tree.display(), "no VCS revision available for dev suffix");
            }
            info
        })
    } else {
        None
    };
    format_version_with(version, info.as_ref())
}

/// Format a version against an already-queried VCS result.
///
/// Pure variant of [`format_version`] for callers that hold a
/// [`VcsInfo`] (or definitively know there is none).
pub fn format_version_with(version: &Version, info: Option<&VcsInfo>) -> String {
    let base = version.to_string();
    match info {
        Some(info) if version.is_dev() => format!("{}{}", base, info.revno),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::{VcsInfo, VcsKind};
    use crate::version::ReleaseLevel;

    fn git_info(revno: &str) -> VcsInfo {
        VcsInfo {
            kind: VcsKind::Git,
            revno: revno.to_string(),
            branch_nick: Some("main".to_string()),
            commit_id: Some(format!("{}deadbeefdeadbeefdeadbeefdeadbeef", revno)),
        }
    }

    #[test]
    fn test_format_version_with_appends_revno_for_dev() {
        let v: Version = "1.3.0.dev".parse().unwrap();
        let formatted = format_version_with(&v, Some(&git_info("763fbe3")));
        assert_eq!(formatted, "1.3.dev763fbe3");
    }

    #[test]
    fn test_format_version_with_ignores_info_for_releases() {
        let v = Version::new(1, 3, 0, ReleaseLevel::Beta, 1).unwrap();
        let formatted = format_version_with(&v, Some(&git_info("763fbe3")));
        assert_eq!(formatted, "1.3b1");
    }

    #[test]
    fn test_format_version_without_tree_keeps_bare_dev() {
        let v: Version = "1.3.0.dev".parse().unwrap();
        assert_eq!(format_version(&v, None), "1.3.dev");
    }

    #[test]
    fn test_format_version_unversioned_tree_keeps_bare_dev() {
        // A fresh temp dir has no VCS control directory.
        let dir = tempfile::tempdir().unwrap();
        let v: Version = "2.0.0.dev".parse().unwrap();
        assert_eq!(format_version(&v, Some(dir.path())), "2.0.dev");
    }
}
