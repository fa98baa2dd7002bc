//! Commit history operations

use git2::{Oid, Sort};
use tracing::{debug, instrument, trace};

use crate::repository::{GitRepo, Result};
use crate::types::{CommitInfo, TagInfo};

impl GitRepo {
    /// Commits reachable from `tip` that are not reachable from `since`, newest first.
    ///
    /// Ordering is topological only, so commits with out-of-order dates still
    /// appear in the order they were made. `None` walks the full history.
    #[instrument(skip(self, since))]
    pub fn commits_since(&self, tip: Oid, since: Option<&TagInfo>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(tip)?;

        if let Some(tag) = since {
            revwalk.hide(Oid::from_str(&tag.commit_hash)?)?;
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let info = CommitInfo::from(&self.repo.find_commit(oid)?);
            trace!(hash = %info.short_hash, author = %info.author, time = %info.time, "commit");
            commits.push(info);
        }

        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}
