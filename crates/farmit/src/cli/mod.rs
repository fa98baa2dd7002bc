//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{LoginCommand, LogoutCommand, ReleaseCommand};

/// Farmit - create release branches with an updated changelog
#[derive(Debug, Parser)]
#[command(name = "farmit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Release without naming the subcommand: `farmit micro`
    #[command(flatten)]
    pub release: ReleaseCommand,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a release branch with an updated changelog
    Release(ReleaseCommand),

    /// Store an access token used to push over HTTPS
    Login(LoginCommand),

    /// Remove a stored access token
    Logout(LogoutCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Some(Commands::Release(cmd)) => cmd.execute(self),
            Some(Commands::Login(cmd)) => cmd.execute(self),
            Some(Commands::Logout(cmd)) => cmd.execute(self),
            None => self.release.execute(self),
        }
    }

    /// Directory commands operate in
    pub fn working_directory(&self) -> anyhow::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}
