//! Mercurial backend.

use std::path::Path;

use super::{run_tool, VcsBackend, VcsError, VcsInfo, VcsKind};

/// Mercurial integration.
///
/// The revision identifier is the numeric local revision of the working
/// directory parent, as printed by `hg identify --num`.
pub struct HgBackend;

impl VcsBackend for HgBackend {
    fn kind(&self) -> VcsKind {
        VcsKind::Hg
    }

    fn query(&self, tree: &Path) -> Result<VcsInfo, VcsError> {
        let raw = run_tool("hg", &["identify", "--num"], tree)?;
        let revno = parse_revno(&raw).ok_or(VcsError::BadOutput { tool: "hg" })?;

        let branch_nick = run_tool("hg", &["branch"], tree).ok();

        Ok(VcsInfo {
            kind: VcsKind::Hg,
            revno,
            branch_nick,
            commit_id: None,
        })
    }
}

/// Extract the revision number from `hg identify --num` output.
///
/// A trailing '+' marks uncommitted changes; the number itself is the
/// revision. Output with no number at all yields `None`.
fn parse_revno(raw: &str) -> Option<String> {
    let revno = raw.trim_end_matches('+');
    if revno.is_empty() {
        None
    } else {
        Some(revno.to_string())
    }
}
