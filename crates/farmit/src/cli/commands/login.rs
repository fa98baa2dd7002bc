//! Login command

use std::io::Read;

use clap::Args;
use dialoguer::Password;
use tracing::info;

use farmit_core::credentials::DEFAULT_HOST;
use farmit_core::{CredentialStore, FarmitError};

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Store an access token used to push over HTTPS
#[derive(Debug, Clone, Args)]
pub struct LoginCommand {
    /// Host the token is for
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Token to store (prompted for when omitted)
    #[arg(long, env = "FARMIT_TOKEN", hide_env_values = true, conflicts_with = "with_token")]
    pub token: Option<String>,

    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,
}

impl LoginCommand {
    /// Execute the login command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(host = %self.host, with_token = self.with_token, "executing login command");
        let store = CredentialStore::default_location().map_err(FarmitError::from)?;

        self.run(&store, std::io::stdin().lock())?;

        if !cli.quiet {
            output::success(&format!(
                "Logged in to {} (token stored in {})",
                self.host,
                path_style().apply_to(store.path().display())
            ));
        }
        Ok(())
    }

    /// Resolve the token and save it in `store`
    fn run(&self, store: &CredentialStore, input: impl Read) -> anyhow::Result<()> {
        let token = match (&self.token, self.with_token) {
            (Some(token), _) => token.clone(),
            (None, true) => read_token(input)?,
            (None, false) => Password::new()
                .with_prompt(format!("Token for {}", self.host))
                .interact()?,
        };

        store
            .save(&self.host, &token)
            .map_err(FarmitError::from)?;
        Ok(())
    }
}

fn read_token(mut input: impl Read) -> anyhow::Result<String> {
    let mut buf = String::new();
    input.read_to_string(&mut buf)?;
    Ok(buf.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn command(token: Option<&str>, with_token: bool) -> LoginCommand {
        LoginCommand {
            host: DEFAULT_HOST.to_string(),
            token: token.map(str::to_string),
            with_token,
        }
    }

    #[test]
    fn test_login_with_token_argument() {
        let temp = TempDir::new().unwrap();
        let store = CredentialStore::at(temp.path().join("credentials.toml"));

        command(Some("ghp_abc"), false)
            .run(&store, std::io::empty())
            .unwrap();

        assert_eq!(store.token("github.com").unwrap().as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn test_login_with_token_from_stdin() {
        let temp = TempDir::new().unwrap();
        let store = CredentialStore::at(temp.path().join("credentials.toml"));

        command(None, true)
            .run(&store, "ghp_from_stdin\n".as_bytes())
            .unwrap();

        assert_eq!(
            store.token("github.com").unwrap().as_deref(),
            Some("ghp_from_stdin")
        );
    }

    #[test]
    fn test_login_with_empty_stdin_fails() {
        let temp = TempDir::new().unwrap();
        let store = CredentialStore::at(temp.path().join("credentials.toml"));

        let err = command(None, true).run(&store, "\n".as_bytes()).unwrap_err();
        assert!(err.downcast_ref::<FarmitError>().is_some());
        assert_eq!(store.token("github.com").unwrap(), None);
    }
}
