//! Release command

use clap::Args;
use console::style;
use tracing::{debug, info};

use farmit_core::config::load_config_or_default;
use farmit_core::{CredentialStore, FarmitError, ReleaseRequest};
use farmit_git::{remote_host, GitRepo, RemoteAuth};

use crate::cli::output::{self, branch_style, key_value, path_style, version_style};
use crate::cli::{Cli, OutputFormat};
use crate::workflow::{ReleaseOptions, ReleaseReport, ReleaseWorkflow};

/// Create a release branch with an updated changelog
#[derive(Debug, Clone, Args)]
pub struct ReleaseCommand {
    /// Release to create: major, minor, micro or a version such as 1.2.3
    #[arg(value_name = "RELEASE", required = true)]
    pub release: Option<String>,

    /// Show the changelog update without creating a branch, committing or pushing
    #[arg(short, long)]
    pub dry_run: bool,

    /// Remote to fetch from and push to (default: configured remote, else origin)
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Allow uncommitted changes to tracked files
    #[arg(short = 'u', long)]
    pub allow_uncommitted_changes: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            release = ?self.release,
            dry_run = self.dry_run,
            remote = ?self.remote,
            allow_uncommitted_changes = self.allow_uncommitted_changes,
            "executing release command"
        );

        let release = self
            .release
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("missing release: major, minor, micro or a version"))?;
        let request: ReleaseRequest = release.parse().map_err(FarmitError::from)?;

        let cwd = cli.working_directory()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        match &config_path {
            Some(path) => debug!(path = %path.display(), "using configuration file"),
            None => debug!("no configuration file, using defaults"),
        }

        let repo = GitRepo::discover(&cwd).map_err(FarmitError::from)?;
        let remote = self
            .remote
            .clone()
            .unwrap_or_else(|| config.git.remote.clone());
        let auth = remote_auth(&repo, &remote)?;

        let mut options = ReleaseOptions::new(request).dry_run(self.dry_run);
        options.remote = Some(remote);
        options.allow_uncommitted_changes = self.allow_uncommitted_changes;

        let report = ReleaseWorkflow::new(&repo, &config, options)
            .with_auth(auth)
            .execute()?;

        print_report(cli, &report)
    }
}

/// Token for HTTPS remotes whose host has stored credentials
fn remote_auth(repo: &GitRepo, remote: &str) -> anyhow::Result<RemoteAuth> {
    let url = match repo.remote_url(remote).map_err(FarmitError::from)? {
        Some(url) if url.starts_with("https://") => url,
        _ => return Ok(RemoteAuth::none()),
    };
    let Some(host) = remote_host(&url) else {
        return Ok(RemoteAuth::none());
    };

    let store = match CredentialStore::default_location() {
        Ok(store) => store,
        Err(e) => {
            debug!(error = %e, "credential store unavailable");
            return Ok(RemoteAuth::none());
        }
    };

    match store.token(&host).map_err(FarmitError::from)? {
        Some(token) => {
            debug!(host = %host, "using stored token");
            Ok(RemoteAuth::with_token(token))
        }
        None => Ok(RemoteAuth::none()),
    }
}

fn print_report(cli: &Cli, report: &ReleaseReport) -> anyhow::Result<()> {
    if cli.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.dry_run {
        println!(
            "If not run with --dry-run, farmit would update {} with:",
            path_style().apply_to(report.changelog.display())
        );
        println!();
        print!("{}", report.section);
        return Ok(());
    }

    if !cli.quiet {
        output::success(&format!(
            "Release branch {} for version {}",
            branch_style().apply_to(&report.branch),
            version_style().apply_to(&report.version)
        ));
        println!(
            "{}",
            key_value(
                "previous",
                report.previous_version.as_deref().unwrap_or("none")
            )
        );
        println!("{}", key_value("base", &report.base));
        if let Some(commit) = &report.commit {
            println!("{}", key_value("commit", commit));
        }
        if report.pushed {
            output::info(&format!("Pushed {}", style(&report.branch).yellow()));
        }
    }

    if let Some(url) = &report.pull_request_url {
        println!(
            "Create a pull request for '{}' on GitHub by visiting:\n\t{}",
            report.branch,
            path_style().apply_to(url)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, INITIAL_CHANGELOG};
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_invalid_release_argument() {
        let fx = fixture(&["First commit"]);
        let dir = fx.path().to_str().unwrap();

        let err = cli(&["farmit", "-C", dir, "mega"]).execute().unwrap_err();
        let farmit = err.downcast_ref::<FarmitError>().unwrap();
        assert!(matches!(farmit, FarmitError::Version(_)));
        assert!(!farmit.is_config());
    }

    #[test]
    fn test_dry_run_through_cli() {
        let fx = fixture(&["First commit"]);
        let dir = fx.path().to_str().unwrap();

        cli(&["farmit", "-C", dir, "--format", "json", "micro", "--dry-run"])
            .execute()
            .unwrap();

        assert_eq!(fx.changelog(), INITIAL_CHANGELOG);
        assert_eq!(fx.repo().current_branch().unwrap(), Some(fx.branch.clone()));
    }

    #[test]
    fn test_release_subcommand_through_cli() {
        let fx = fixture(&["First commit"]);
        let dir = fx.path().to_str().unwrap();

        cli(&["farmit", "-q", "-C", dir, "release", "minor"])
            .execute()
            .unwrap();

        let tip = fx.repo().branch_tip("release/1.1.0").unwrap();
        assert_eq!(fx.repo().upstream_tip("release/1.1.0").unwrap(), Some(tip));
    }

    #[test]
    fn test_invalid_configuration_is_config_error() {
        let fx = fixture(&["First commit"]);
        let nested = fx.path().join(".git");
        std::fs::write(nested.join("farmit.toml"), "[git]\nremote = \"\"\n").unwrap();

        let err = cli(&["farmit", "-C", nested.to_str().unwrap(), "micro"])
            .execute()
            .unwrap_err();
        let farmit = err.downcast_ref::<FarmitError>().unwrap();
        assert!(farmit.is_config());
    }

    #[test]
    fn test_remote_auth_without_https() {
        let fx = fixture(&[]);
        let auth = remote_auth(&fx.repo(), "origin").unwrap();
        assert!(!auth.has_token());
    }
}
