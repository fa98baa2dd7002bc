//! Logout command

use clap::Args;
use tracing::info;

use farmit_core::credentials::DEFAULT_HOST;
use farmit_core::{CredentialStore, FarmitError};

use crate::cli::output;
use crate::cli::Cli;

/// Remove a stored access token
#[derive(Debug, Clone, Args)]
pub struct LogoutCommand {
    /// Host to forget the token for
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
}

impl LogoutCommand {
    /// Execute the logout command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(host = %self.host, "executing logout command");
        let store = CredentialStore::default_location().map_err(FarmitError::from)?;

        if self.run(&store)? {
            if !cli.quiet {
                output::success(&format!("Logged out of {}", self.host));
            }
        } else {
            output::warning(&format!("Not logged in to {}", self.host));
        }
        Ok(())
    }

    /// Remove the token from `store`; `false` when none was stored
    fn run(&self, store: &CredentialStore) -> anyhow::Result<bool> {
        Ok(store.remove(&self.host).map_err(FarmitError::from)?)
    }
}
