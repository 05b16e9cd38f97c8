//! Bazaar backend.

use std::path::Path;

use super::{run_tool, VcsBackend, VcsError, VcsInfo, VcsKind};

/// Bazaar integration.
///
/// The revision identifier is the branch revision number from
/// `bzr revno`.
pub struct BzrBackend;

impl VcsBackend for BzrBackend {
    fn kind(&self) -> VcsKind {
        VcsKind::Bzr
    }

    fn query(&self, tree: &Path) -> Result<VcsInfo, VcsError> {
        let revno = run_tool("bzr", &["revno"], tree)?;

        let branch_nick = run_tool("bzr", &["nick"], tree).ok();

        Ok(VcsInfo {
            kind: VcsKind::Bzr,
            revno,
            branch_nick,
            commit_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_detect_requires_control_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!BzrBackend.detect(dir.path()));

        fs::create_dir(dir.path().join(".bzr")).unwrap();
        assert!(BzrBackend.detect(dir.path()));
    }
}
