//! Release branch workflow

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use farmit_changelog::{
    ChangelogEntry, ChangelogFile, ChangelogGenerator, ReleaseSection, UpdateOutcome,
};
use farmit_core::config::Config;
use farmit_core::error::{GitError, ReleaseError};
use farmit_core::{ReleaseRequest, Result};
use farmit_git::{pull_request_url, GitRepo, RemoteAuth};

/// Options for a release
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Bump keyword or explicit version
    pub request: ReleaseRequest,
    /// Remote overriding the configured one
    pub remote: Option<String>,
    /// Only report what would happen
    pub dry_run: bool,
    /// Skip the clean working tree check
    pub allow_uncommitted_changes: bool,
}

impl ReleaseOptions {
    /// Options for a regular release
    pub fn new(request: ReleaseRequest) -> Self {
        Self {
            request,
            remote: None,
            dry_run: false,
            allow_uncommitted_changes: false,
        }
    }

    /// Only report what would happen
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What a release did, or would do in a dry run
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    /// Version being released
    pub version: String,
    /// Version of the latest release tag
    pub previous_version: Option<String>,
    /// Release branch name
    pub branch: String,
    /// Remote-tracking reference the branch starts from
    pub base: String,
    /// Changelog path
    pub changelog: PathBuf,
    /// Rendered section prepended to the changelog
    pub section: String,
    /// Entries of the release
    pub entries: Vec<ChangelogEntry>,
    /// Whether nothing was modified
    pub dry_run: bool,
    /// How the changelog file was updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_update: Option<UpdateOutcome>,
    /// Release commit, when one was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Whether the branch was pushed by this run
    pub pushed: bool,
    /// Link for opening a pull request on GitHub
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_url: Option<String>,
}

/// Execute a release workflow
pub struct ReleaseWorkflow<'a> {
    repo: &'a GitRepo,
    config: &'a Config,
    options: ReleaseOptions,
    auth: RemoteAuth,
}

impl<'a> ReleaseWorkflow<'a> {
    /// Create a new release workflow
    pub fn new(repo: &'a GitRepo, config: &'a Config, options: ReleaseOptions) -> Self {
        Self {
            repo,
            config,
            options,
            auth: RemoteAuth::none(),
        }
    }

    /// Authentication for fetch and push
    pub fn with_auth(mut self, auth: RemoteAuth) -> Self {
        self.auth = auth;
        self
    }

    fn remote(&self) -> &str {
        self.options
            .remote
            .as_deref()
            .unwrap_or(&self.config.git.remote)
    }

    /// Execute the release
    #[instrument(skip(self), fields(dry_run = self.options.dry_run))]
    pub fn execute(&self) -> Result<ReleaseReport> {
        let workdir = self.repo.workdir()?.to_path_buf();

        self.check_working_tree()?;

        let remote = self.remote();
        self.repo.fetch(remote, &self.auth)?;
        let base =
            self.repo
                .remote_default_branch(remote, &self.config.git.default_branch, &self.auth)?;
        let tip = self.repo.reference_tip(&base)?;

        let latest = self.repo.find_latest_tag()?;
        let current = latest.as_ref().and_then(|tag| tag.version.clone());
        let version = self
            .options
            .request
            .next_version(current.as_ref())
            .to_string();

        let commits = self.repo.commits_since(tip, latest.as_ref())?;
        if commits.is_empty() {
            let since = latest.map(|tag| tag.name).unwrap_or_else(|| base.clone());
            return Err(ReleaseError::NoChanges(since).into());
        }

        let generator = ChangelogGenerator::new(&self.config.changelog)?;
        let section = generator.generate(&version, &commits)?;

        info!(
            version = %version,
            previous = ?current.as_ref().map(ToString::to_string),
            base = %base,
            commit_count = commits.len(),
            "executing release workflow"
        );

        let mut report = ReleaseReport {
            branch: self.config.git.release_branch(&version),
            previous_version: current.map(|v| v.to_string()),
            version,
            base,
            changelog: workdir.join(&self.config.changelog.file),
            section: generator.format(&section),
            entries: section.entries.clone(),
            dry_run: self.options.dry_run,
            changelog_update: None,
            commit: None,
            pushed: false,
            pull_request_url: None,
        };

        if self.options.dry_run {
            info!(branch = %report.branch, "dry run, leaving repository untouched");
            return Ok(report);
        }

        let branch = report.branch.clone();
        let base = report.base.clone();
        self.on_release_branch(&branch, &base, || {
            self.publish(&generator, &section, &workdir, &mut report)
        })?;

        Ok(report)
    }

    fn check_working_tree(&self) -> Result<()> {
        if !self.options.allow_uncommitted_changes && !self.repo.is_clean()? {
            return Err(GitError::DirtyWorkingDirectory.into());
        }

        let untracked = self.repo.untracked_files()?;
        if !untracked.is_empty() {
            return Err(GitError::UntrackedFiles(untracked).into());
        }

        Ok(())
    }

    /// Run `work` with the release branch checked out, then return to the
    /// branch checked out before, whether or not `work` succeeded.
    fn on_release_branch<F>(&self, branch: &str, base: &str, work: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let original = self.repo.current_branch()?;

        self.repo.create_branch(branch, base)?;
        self.repo.checkout_branch(branch)?;

        let result = work();

        match original {
            Some(original) if original != branch => {
                if let Err(e) = self.repo.checkout_branch(&original) {
                    error!(branch = %original, error = %e, "failed to check out original branch");
                    if result.is_ok() {
                        return Err(e.into());
                    }
                }
            }
            Some(_) => {}
            None => warn!(branch, "HEAD was detached, staying on release branch"),
        }

        result
    }

    fn publish(
        &self,
        generator: &ChangelogGenerator,
        section: &ReleaseSection,
        workdir: &Path,
        report: &mut ReleaseReport,
    ) -> Result<()> {
        let file = ChangelogFile::new(&report.changelog);
        report.changelog_update = Some(file.prepend(&report.section, &section.header())?);

        let relative = file
            .path()
            .strip_prefix(workdir)
            .unwrap_or(self.config.changelog.file.as_path());
        let message = format!(
            "{}\n\n{}",
            self.config.git.commit_title(&section.version),
            generator.body(section)
        );

        match self.repo.commit_paths(&[relative], &message)? {
            Some(oid) => report.commit = Some(oid.to_string()),
            None => warn!("{} has already been committed", relative.display()),
        }

        let remote = self.remote();
        let tip = self.repo.branch_tip(&report.branch)?;
        if self.repo.upstream_tip(&report.branch)? == Some(tip) {
            warn!(branch = %report.branch, "release branch has already been pushed");
        } else {
            self.repo.push_branch(remote, &report.branch, &self.auth)?;
            self.repo.set_upstream(&report.branch, remote)?;
            report.pushed = true;
        }

        report.pull_request_url = self
            .repo
            .remote_url(remote)?
            .and_then(|url| pull_request_url(&url, &report.branch));

        Ok(())
    }
}
