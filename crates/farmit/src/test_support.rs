//! Scratch repositories for the workflow and command tests

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

use farmit_core::config::Config;
use farmit_git::GitRepo;

/// Changelog committed by the tagged 1.0.0 release
pub(crate) const INITIAL_CHANGELOG: &str = "## 1.0.0\n\n+ Initial Release";

/// Working repository cloned-alike from a bare origin
pub(crate) struct Fixture {
    pub(crate) work: TempDir,
    pub(crate) origin: TempDir,
    pub(crate) branch: String,
    pub(crate) config: Config,
}

impl Fixture {
    pub(crate) fn path(&self) -> &Path {
        self.work.path()
    }

    pub(crate) fn origin_path(&self) -> PathBuf {
        self.origin.path().to_path_buf()
    }

    pub(crate) fn repo(&self) -> GitRepo {
        GitRepo::discover(self.work.path()).unwrap()
    }

    pub(crate) fn raw(&self) -> Repository {
        Repository::open(self.work.path()).unwrap()
    }

    /// Push the current branch to origin again
    pub(crate) fn push(&self) {
        let raw = self.raw();
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", self.branch);
        raw.find_remote("origin")
            .unwrap()
            .push(&[refspec.as_str()], None)
            .unwrap();
    }

    pub(crate) fn changelog(&self) -> String {
        std::fs::read_to_string(self.work.path().join("CHANGELOG.md")).unwrap()
    }
}

/// Write a file and commit it on HEAD
pub(crate) fn commit_file(repo: &Repository, file: &str, content: &str, message: &str) -> Oid {
    std::fs::write(repo.workdir().unwrap().join(file), content).unwrap();
    commit_path(repo, file, message)
}

/// Commit the current workdir content of `file` on HEAD
pub(crate) fn commit_path(repo: &Repository, file: &str, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Repository tagged 1.0.0 plus one commit per message, pushed to a bare origin
pub(crate) fn fixture(messages: &[&str]) -> Fixture {
    let work = TempDir::new().unwrap();
    let repo = Repository::init(work.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    let oid = commit_file(&repo, "CHANGELOG.md", INITIAL_CHANGELOG, "Release 1.0.0");
    repo.tag_lightweight("1.0.0", &repo.find_object(oid, None).unwrap(), false)
        .unwrap();
    for (i, message) in messages.iter().enumerate() {
        commit_file(&repo, &format!("file{}.txt", i), message, message);
    }

    let branch = repo.head().unwrap().shorthand().unwrap().to_string();

    let origin = TempDir::new().unwrap();
    Repository::init_bare(origin.path()).unwrap();
    let url = format!("file://{}", origin.path().display());
    let mut remote = repo.remote("origin", &url).unwrap();
    let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
    remote.push(&[refspec.as_str()], None).unwrap();

    // Same layout `git clone` leaves behind
    repo.reference_symbolic(
        "refs/remotes/origin/HEAD",
        &format!("refs/remotes/origin/{}", branch),
        true,
        "fixture",
    )
    .unwrap();

    let mut config = Config::default();
    config.git.default_branch = branch.clone();

    Fixture {
        work,
        origin,
        branch,
        config,
    }
}
