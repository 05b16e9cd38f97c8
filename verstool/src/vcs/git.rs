//! Git backend.

use std::path::Path;

use super::{run_tool, VcsBackend, VcsError, VcsInfo, VcsKind};

/// Length of the abbreviated commit id used as the dev revision suffix.
const ABBREV_LEN: usize = 7;

/// Git integration.
///
/// Queries the repository with `git rev-parse`; the revision identifier
/// is the abbreviated commit id of the current head, e.g. `763fbe3`.
pub struct GitBackend;

impl VcsBackend for GitBackend {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    fn query(&self, tree: &Path) -> Result<VcsInfo, VcsError> {
        let commit_id = run_tool("git", &["rev-parse", "HEAD"], tree)?;
        let revno = abbrev_commit(&commit_id);

        let branch_nick = run_tool("git", &["rev-parse", "--abbrev-ref", "HEAD"], tree)
            .ok()
            .and_then(normalize_branch);

        Ok(VcsInfo {
            kind: VcsKind::Git,
            revno,
            branch_nick,
            commit_id: Some(commit_id),
        })
    }
}

/// Abbreviate a full commit id to the dev-suffix length.
fn abbrev_commit(commit_id: &str) -> String {
    commit_id.chars().take(ABBREV_LEN).collect()
}

/// Normalize the `rev-parse --abbrev-ref HEAD` answer.
///
/// Prints the literal "HEAD" when the head is detached; there is no
/// branch nickname in that case.
fn normalize_branch(name: String) -> Option<String> {
    if name == "HEAD" {
        None
    } else {
        Some(name)
    }
}
