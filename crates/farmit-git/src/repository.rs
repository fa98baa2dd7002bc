//! Locating the repository farmit releases from

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::{debug, instrument};

use farmit_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Handle on the repository containing the directory farmit was started in.
///
/// A bare repository can be opened so tags and history stay readable, but
/// [`GitRepo::workdir`] refuses it: there is no `CHANGELOG.md` to update.
pub struct GitRepo {
    pub(crate) repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Find the repository enclosing `start`, walking up parent directories
    #[instrument(fields(start = %start.display()))]
    pub fn discover(start: &Path) -> Result<Self> {
        let repo = Repository::discover(start).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepository(start.to_path_buf()),
            _ => GitError::OpenFailed(e.to_string()),
        })?;

        let root = match repo.workdir() {
            Some(workdir) => workdir.to_path_buf(),
            None => repo.path().to_path_buf(),
        };
        debug!(root = %root.display(), bare = repo.is_bare(), "found repository");

        Ok(Self { repo, root })
    }

    /// Top-level directory, or the git directory itself when bare
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Working tree root; fails with `NotARepository` for a bare repository
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| GitError::NotARepository(self.root.clone()))
    }

    /// Commit HEAD points at
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::test_support::{commit_file, init_repo};

    #[test]
    fn test_discover_from_nested_directory() {
        let (temp, raw) = init_repo();
        let nested = temp.path().join("docs").join("api");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = GitRepo::discover(&nested).unwrap();
        assert_eq!(
            repo.workdir().unwrap().canonicalize().unwrap(),
            raw.workdir().unwrap().canonicalize().unwrap()
        );
        assert_eq!(repo.path(), repo.workdir().unwrap());
    }

    #[test]
    fn test_bare_repository_has_no_workdir() {
        let temp = TempDir::new().unwrap();
        Repository::init_bare(temp.path()).unwrap();

        let repo = GitRepo::discover(temp.path()).unwrap();
        assert!(matches!(repo.workdir(), Err(GitError::NotARepository(_))));
    }

    #[test]
    fn test_outside_any_repository() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::discover(temp.path());
        assert!(matches!(result, Err(GitError::NotARepository(p)) if p == temp.path()));
    }

    #[test]
    fn test_head_commit() {
        let (temp, raw) = init_repo();
        let repo = GitRepo::discover(temp.path()).unwrap();
        assert!(repo.head_commit().is_err());

        let oid = commit_file(&raw, "README.md", "farm", "Initial commit");
        assert_eq!(repo.head_commit().unwrap().id(), oid);
    }
}
