//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for farmit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote to branch off and push to
    pub remote: String,

    /// Default branch used when the remote does not advertise one
    pub default_branch: String,

    /// Prefix for release branch names
    pub branch_prefix: String,

    /// Release commit title template
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            default_branch: "main".to_string(),
            branch_prefix: "release/".to_string(),
            commit_message: "Release {version}".to_string(),
        }
    }
}

impl GitConfig {
    /// Release branch name for a version
    pub fn release_branch(&self, version: &str) -> String {
        format!("{}{}", self.branch_prefix, version)
    }

    /// Release commit title for a version
    pub fn commit_title(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to the repository root
    pub file: PathBuf,

    /// Issue-tracker keywords whose lines are dropped (e.g. "fixes" in "Fixes #12")
    pub keywords: Vec<String>,

    /// Trailer tokens whose lines are dropped (e.g. "Co-authored-by")
    pub trailers: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            keywords: super::defaults::DEFAULT_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            trailers: super::defaults::DEFAULT_TRAILERS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}
