//! Farmit - create release branches with an updated changelog

mod cli;
mod exit_codes;
#[cfg(test)]
mod test_support;
mod workflow;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};
use farmit_core::FarmitError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    match cli.execute() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            output::error(&format!("{:#}", e));
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Map an error to the process exit code
fn exit_code_for(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<FarmitError>() {
        Some(e) if e.is_config() => exit_codes::CONFIG_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Console filter from `RUST_LOG`, else from the number of `-v` flags
fn console_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    })
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG or `-v` (default: warn)
/// - File: always debug-level JSON to ~/.farmit/logs/
fn init_tracing(verbosity: u8) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter = console_filter(verbosity);

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "farmit.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".farmit").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmit_core::error::{ConfigError, GitError, ReleaseError};

    #[test]
    fn test_exit_codes() {
        let config: anyhow::Error = FarmitError::from(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "must not be empty".to_string(),
        })
        .into();
        assert_eq!(exit_code_for(&config), exit_codes::CONFIG_ERROR);

        let git: anyhow::Error = FarmitError::from(GitError::DirtyWorkingDirectory).into();
        assert_eq!(exit_code_for(&git), exit_codes::ERROR);

        let release: anyhow::Error =
            FarmitError::from(ReleaseError::NoChanges("1.0.0".to_string())).into();
        assert_eq!(exit_code_for(&release), exit_codes::ERROR);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    }

    #[test]
    fn test_exit_code_survives_context() {
        let error = anyhow::Error::from(FarmitError::from(ConfigError::InvalidValue {
            field: "changelog.commit_title".to_string(),
            message: "must contain {version}".to_string(),
        }))
        .context("loading configuration");
        assert_eq!(exit_code_for(&error), exit_codes::CONFIG_ERROR);
    }
}
