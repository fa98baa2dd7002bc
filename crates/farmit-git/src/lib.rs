//! farmit git - git operations for release management
//!
//! This crate wraps `git2` with the repository operations a release needs:
//! tag lookup, commit history, branches, commits, fetch and push.

mod branches;
mod commits;
mod remote;
mod repository;
mod status;
mod tags;
pub mod types;

#[cfg(test)]
mod test_support;

pub use remote::{pull_request_url, remote_host, RemoteAuth};
pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
