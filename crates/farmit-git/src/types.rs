//! Commits and tags as seen by the release workflow

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use semver::Version;
use serde::Serialize;

/// Release tag names: `1.2.3`, `v1.2.3`, `pkg@1.2.3`, `pkg@v1.2.3`, `pkg-v1.2.3`
static RELEASE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:.*@v?|.*-v|v)?(?P<version>\d+\.\d+\.\d+\S*)$").expect("Invalid regex")
});

/// A commit between the last release and the tip being released
#[derive(Debug, Clone, Serialize)]
pub struct CommitInfo {
    /// Full hash
    pub hash: String,
    /// Abbreviated hash used in messages
    pub short_hash: String,
    /// Raw commit message, untrimmed
    pub message: String,
    /// Author name
    pub author: String,
    /// Author time
    pub time: DateTime<Utc>,
}

impl CommitInfo {
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        Self {
            short_hash: hash.chars().take(7).collect(),
            hash,
            message: message.into(),
            author: author.into(),
            time,
        }
    }

    /// First non-empty line of the message
    pub fn summary(&self) -> &str {
        self.message
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }
}

impl From<&git2::Commit<'_>> for CommitInfo {
    fn from(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let time = Utc
            .timestamp_opt(author.when().seconds(), 0)
            .single()
            .unwrap_or_default();

        Self::new(
            commit.id().to_string(),
            String::from_utf8_lossy(commit.message_bytes()),
            String::from_utf8_lossy(author.name_bytes()),
            time,
        )
    }
}

/// A tag and, when its name is a release tag, the version it marks
#[derive(Debug, Clone)]
pub struct TagInfo {
    pub name: String,
    /// Commit the tag resolves to
    pub commit_hash: String,
    /// Annotation, for annotated tags
    pub message: Option<String>,
    pub version: Option<Version>,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            version: release_version(&name),
            name,
            commit_hash: commit_hash.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Version a release tag name carries, or `None` for any other tag
fn release_version(name: &str) -> Option<Version> {
    let caps = RELEASE_TAG_REGEX.captures(name)?;
    Version::parse(&caps["version"]).ok()
}
