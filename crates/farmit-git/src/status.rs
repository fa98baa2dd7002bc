//! Repository status operations

use git2::StatusOptions;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Check if tracked files are free of staged or unstaged changes
    pub fn is_clean(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
                || status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Get the current branch name, `None` for a detached or unborn HEAD
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    /// Get list of untracked files
    pub fn untracked_files(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut files = Vec::new();

        for entry in statuses.iter() {
            if let Some(path) = entry.path() {
                if entry.status().is_wt_new() {
                    files.push(path.to_string());
                }
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::tagged_repo;

    #[test]
    fn test_is_clean() {
        let (_temp, repo) = tagged_repo("1.0.0", &[]);
        assert!(repo.is_clean().unwrap());
        assert!(repo.untracked_files().unwrap().is_empty());
    }

    #[test]
    fn test_untracked_file_does_not_dirty_tree() {
        let (temp, repo) = tagged_repo("1.0.0", &[]);
        std::fs::write(temp.path().join("new_file.txt"), "new").unwrap();

        assert!(repo.is_clean().unwrap());
        assert_eq!(repo.untracked_files().unwrap(), vec!["new_file.txt".to_string()]);
    }

    #[test]
    fn test_modified_file_dirties_tree() {
        let (temp, repo) = tagged_repo("1.0.0", &[]);
        std::fs::write(temp.path().join("CHANGELOG.md"), "modified").unwrap();
        assert!(!repo.is_clean().unwrap());
    }

    #[test]
    fn test_current_branch() {
        let (_temp, repo) = tagged_repo("1.0.0", &[]);
        // Git might default to 'master' or 'main' depending on config
        assert!(repo.current_branch().unwrap().is_some());
    }
}
