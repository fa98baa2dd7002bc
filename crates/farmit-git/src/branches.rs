//! Branch, checkout and commit operations

use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{BranchType, Oid};
use tracing::{debug, info, instrument, warn};

use crate::repository::{GitRepo, Result};
use farmit_core::error::GitError;

impl GitRepo {
    /// Create a local branch pointing at the commit `start_point` resolves to.
    ///
    /// Returns `false` when the branch already exists; it is left untouched.
    #[instrument(skip(self))]
    pub fn create_branch(&self, name: &str, start_point: &str) -> Result<bool> {
        let commit = self.repo.revparse_single(start_point)?.peel_to_commit()?;

        match self.repo.branch(name, &commit, false) {
            Ok(_) => {
                info!(branch = name, start_point, "created branch");
                Ok(true)
            }
            Err(e) if e.code() == git2::ErrorCode::Exists => {
                warn!(branch = name, "branch already exists");
                Ok(false)
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Check out a local branch, refusing to overwrite local modifications
    #[instrument(skip(self))]
    pub fn checkout_branch(&self, name: &str) -> Result<()> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(name.to_string()))?;

        let reference = branch.into_reference();
        let refname = reference
            .name()
            .ok_or_else(|| GitError::BranchNotFound(name.to_string()))?
            .to_string();
        let target = reference.peel(git2::ObjectType::Commit)?;

        self.repo
            .checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
        self.repo.set_head(&refname)?;

        info!(branch = name, "checked out branch");
        Ok(())
    }

    /// Commit a local branch points at
    pub fn branch_tip(&self, name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(name.to_string()))?;

        Ok(branch.get().peel_to_commit()?.id())
    }

    /// Commit any reference (e.g. `refs/remotes/origin/main`) resolves to
    pub fn reference_tip(&self, refname: &str) -> Result<Oid> {
        Ok(self.repo.find_reference(refname)?.peel_to_commit()?.id())
    }

    /// Commit the upstream of a local branch points at, if it has one
    pub fn upstream_tip(&self, name: &str) -> Result<Option<Oid>> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(name.to_string()))?;

        match branch.upstream() {
            Ok(upstream) => Ok(Some(upstream.get().peel_to_commit()?.id())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Make `<remote>/<name>` the upstream of the local branch `name`
    #[instrument(skip(self))]
    pub fn set_upstream(&self, name: &str, remote: &str) -> Result<()> {
        let tracking = format!("refs/remotes/{}/{}", remote, name);

        if self.repo.find_reference(&tracking).is_err() {
            let tip = self.branch_tip(name)?;
            self.repo
                .reference(&tracking, tip, true, "farmit: record pushed branch")?;
            debug!(reference = %tracking, "created remote-tracking reference");
        }

        let mut branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|_| GitError::BranchNotFound(name.to_string()))?;
        branch.set_upstream(Some(&format!("{}/{}", remote, name)))?;

        info!(branch = name, remote, "tracking branch set");
        Ok(())
    }

    /// Stage `paths` (relative to the workdir) and commit them on HEAD.
    ///
    /// Returns `None` without committing when the staged tree equals HEAD's.
    #[instrument(skip(self, message))]
    pub fn commit_paths(&self, paths: &[&Path], message: &str) -> Result<Option<Oid>> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let parent = self.head_commit()?;

        if parent.tree_id() == tree_id {
            debug!("nothing to commit");
            return Ok(None);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let sig = self.repo.signature()?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;

        info!(commit = %oid, "created commit");
        Ok(Some(oid))
    }
}
