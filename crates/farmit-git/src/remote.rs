//! Remote operations

use git2::{Cred, CredentialType, Direction, FetchOptions, PushOptions, RemoteCallbacks};
use tracing::{debug, info, instrument, warn};

use crate::repository::{GitRepo, Result};
use farmit_core::error::GitError;

/// Username sent alongside a personal access token over HTTPS
const TOKEN_USERNAME: &str = "x-access-token";

/// Maximum credential attempts before libgit2 is told to give up
const MAX_AUTH_ATTEMPTS: usize = 3;

/// Authentication used for fetch and push
#[derive(Clone, Default)]
pub struct RemoteAuth {
    token: Option<String>,
}

impl std::fmt::Debug for RemoteAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAuth")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RemoteAuth {
    /// Use ssh-agent and git's credential helpers only
    pub fn none() -> Self {
        Self::default()
    }

    /// Prefer a personal access token for HTTPS remotes
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Whether a token will be offered to HTTPS remotes
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn callbacks<'a>(&'a self, config: &'a git2::Config) -> RemoteCallbacks<'a> {
        let mut attempts = 0;
        let mut callbacks = RemoteCallbacks::new();

        callbacks.credentials(move |url, username, allowed| {
            attempts += 1;
            if attempts > MAX_AUTH_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(token) = &self.token {
                    return Cred::userpass_plaintext(TOKEN_USERNAME, token);
                }
                return Cred::credential_helper(config, url, username);
            }

            if allowed.contains(CredentialType::SSH_KEY) {
                return Cred::ssh_key_from_agent(username.unwrap_or("git"));
            }

            if allowed.contains(CredentialType::USERNAME) {
                return Cred::username(username.unwrap_or("git"));
            }

            Cred::default()
        });

        callbacks
    }
}

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Fetch the configured refspecs of a remote
    #[instrument(skip(self, auth))]
    pub fn fetch(&self, remote_name: &str, auth: &RemoteAuth) -> Result<()> {
        let start = std::time::Instant::now();
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| GitError::RemoteNotFound(remote_name.to_string()))?;

        let config = self.repo.config()?;
        let mut options = FetchOptions::new();
        options.remote_callbacks(auth.callbacks(&config));

        remote
            .fetch(&[] as &[&str], Some(&mut options), None)
            .map_err(GitError::Git2)?;

        info!(
            remote = remote_name,
            duration_ms = start.elapsed().as_millis(),
            "fetched from remote"
        );
        Ok(())
    }

    /// Remote-tracking reference of the remote's default branch,
    /// e.g. `refs/remotes/origin/main`.
    ///
    /// Uses `refs/remotes/<remote>/HEAD` when present, otherwise asks the
    /// remote, otherwise falls back to `<remote>/<fallback>`.
    #[instrument(skip(self, auth))]
    pub fn remote_default_branch(
        &self,
        remote_name: &str,
        fallback: &str,
        auth: &RemoteAuth,
    ) -> Result<String> {
        let head_ref = format!("refs/remotes/{}/HEAD", remote_name);
        if let Ok(reference) = self.repo.find_reference(&head_ref) {
            if let Some(target) = reference.symbolic_target() {
                debug!(target, "default branch from remote HEAD");
                return Ok(target.to_string());
            }
        }

        match self.advertised_default_branch(remote_name, auth) {
            Ok(Some(branch)) => {
                let candidate = format!("refs/remotes/{}/{}", remote_name, branch);
                if self.repo.find_reference(&candidate).is_ok() {
                    debug!(target = %candidate, "default branch advertised by remote");
                    return Ok(candidate);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not ask remote for its default branch"),
        }

        let candidate = format!("refs/remotes/{}/{}", remote_name, fallback);
        if self.repo.find_reference(&candidate).is_ok() {
            debug!(target = %candidate, "default branch from configuration");
            return Ok(candidate);
        }

        Err(GitError::BranchNotFound(format!(
            "{}/{}",
            remote_name, fallback
        )))
    }

    fn advertised_default_branch(
        &self,
        remote_name: &str,
        auth: &RemoteAuth,
    ) -> Result<Option<String>> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| GitError::RemoteNotFound(remote_name.to_string()))?;

        let config = self.repo.config()?;
        let connection =
            remote.connect_auth(Direction::Fetch, Some(auth.callbacks(&config)), None)?;
        let buf = connection.default_branch()?;

        Ok(buf
            .as_str()
            .and_then(|name| name.strip_prefix("refs/heads/"))
            .map(|name| name.to_string()))
    }

    /// Push a local branch to the same name on a remote
    #[instrument(skip(self, auth))]
    pub fn push_branch(&self, remote_name: &str, branch: &str, auth: &RemoteAuth) -> Result<()> {
        let start = std::time::Instant::now();
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| GitError::RemoteNotFound(remote_name.to_string()))?;

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);

        let config = self.repo.config()?;
        let mut callbacks = auth.callbacks(&config);
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                refname, message
            ))),
            None => Ok(()),
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        remote
            .push(&[&refspec], Some(&mut options))
            .map_err(|e| GitError::PushFailed(format!("{}/{}: {}", remote_name, branch, e)))?;

        info!(
            remote = remote_name,
            branch,
            duration_ms = start.elapsed().as_millis(),
            "pushed branch"
        );
        Ok(())
    }
}

/// Host part of a remote URL (`https://host/...`, `ssh://user@host/...`, `user@host:path`)
pub fn remote_host(url: &str) -> Option<String> {
    if let Some((_, rest)) = url.split_once("://") {
        let authority = rest.split('/').next()?;
        let host = authority.rsplit('@').next()?;
        let host = host.split(':').next()?;
        return (!host.is_empty()).then(|| host.to_string());
    }

    let (authority, _) = url.split_once(':')?;
    let host = authority.rsplit('@').next()?;
    (!host.is_empty() && !host.contains('/')).then(|| host.to_string())
}

/// URL for opening a pull request from `branch`, for remotes hosted on GitHub
pub fn pull_request_url(url: &str, branch: &str) -> Option<String> {
    if remote_host(url)?.as_str() != "github.com" {
        return None;
    }

    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/')?.1,
        None => url.split_once(':')?.1,
    };
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut segments = path.rsplit('/');
    let repo = segments.next().filter(|s| !s.is_empty())?;
    let org = segments.next().filter(|s| !s.is_empty())?;

    Some(format!(
        "https://github.com/{}/{}/pull/new/{}",
        org, repo, branch
    ))
}
