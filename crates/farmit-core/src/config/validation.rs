//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    if config.git.default_branch.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.default_branch".to_string(),
            message: "default branch cannot be empty".to_string(),
        }
        .into());
    }

    if !config.git.commit_message.contains("{version}") {
        return Err(ConfigError::InvalidValue {
            field: "git.commit_message".to_string(),
            message: "must contain {version} placeholder".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "file cannot be empty".to_string(),
        }
        .into());
    }

    for (i, keyword) in config.changelog.keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.keywords[{}]", i),
                message: "keyword cannot be empty".to_string(),
            }
            .into());
        }
    }

    for (i, trailer) in config.changelog.trailers.iter().enumerate() {
        if trailer.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.trailers[{}]", i),
                message: "trailer cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
