//! Error types for farmit

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using FarmitError
pub type Result<T> = std::result::Result<T, FarmitError>;

/// Main error type for farmit operations
#[derive(Debug, Error)]
pub enum FarmitError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Release workflow errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Credential store errors
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("fatal: not a git repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Working directory is not clean
    #[error("fatal: uncommitted changes")]
    DirtyWorkingDirectory,

    /// Untracked files present
    #[error("fatal: untracked files: {}", .0.join(", "))]
    UntrackedFiles(Vec<String>),

    /// Branch not found
    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Release argument is neither a bump keyword nor a version
    #[error("Invalid release '{0}': expected major, minor, micro or a version such as 1.2.3")]
    InvalidVersion(String),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Commit message has no title line
    #[error("Invalid commit format: {0}")]
    InvalidCommitFormat(String),

    /// Keyword filter could not be compiled
    #[error("Invalid keyword filter: {0}")]
    InvalidFilter(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Release workflow errors
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Nothing to release
    #[error("No changes since {0}")]
    NoChanges(String),
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Home directory could not be determined
    #[error("Unable to determine home directory for credential storage")]
    NoHomeDirectory,

    /// Token was empty
    #[error("Token for {0} cannot be empty")]
    EmptyToken(String),

    /// Credentials file is malformed
    #[error("Failed to parse credentials file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Credentials could not be serialized
    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FarmitError {
    /// Whether this error stems from configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
