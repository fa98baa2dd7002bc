//! Fixtures shared by the unit tests of this crate

use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

use crate::GitRepo;

/// Initialise a repository with a committer identity configured
pub(crate) fn init_repo() -> (TempDir, Repository) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    (temp, repo)
}

/// Write a file and commit it on HEAD
pub(crate) fn commit_file(repo: &Repository, file: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    std::fs::write(workdir.join(file), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Repository with one tagged commit followed by the given commits
pub(crate) fn tagged_repo(tag: &str, messages: &[&str]) -> (TempDir, GitRepo) {
    let (temp, repo) = init_repo();
    let oid = commit_file(&repo, "CHANGELOG.md", "## 1.0.0\n\n+ Initial Release", "Release 1.0.0");
    let commit = repo.find_commit(oid).unwrap();
    repo.tag_lightweight(tag, commit.as_object(), false).unwrap();

    for (i, message) in messages.iter().enumerate() {
        commit_file(&repo, &format!("file{}.txt", i), message, message);
    }

    let git_repo = GitRepo::discover(temp.path()).unwrap();
    (temp, git_repo)
}
