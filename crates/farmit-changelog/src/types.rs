//! Changelog types

use serde::{Deserialize, Serialize};

/// One commit's contribution to the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// First non-empty line of the commit message
    pub title: String,
    /// List items from the commit body, marker stripped, in original order
    pub descriptions: Vec<String>,
    /// Hash of the originating commit, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl ChangelogEntry {
    /// Create an entry without descriptions
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            descriptions: Vec::new(),
            commit: None,
        }
    }

    /// Set the description lines
    pub fn with_descriptions(mut self, descriptions: Vec<String>) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Set the originating commit hash
    pub fn with_commit(mut self, hash: impl Into<String>) -> Self {
        self.commit = Some(hash.into());
        self
    }
}

/// All entries of one release, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSection {
    /// Version being released
    pub version: String,
    /// Entries in this release
    pub entries: Vec<ChangelogEntry>,
}

impl ReleaseSection {
    /// Create a section
    pub fn new(version: impl Into<String>, entries: Vec<ChangelogEntry>) -> Self {
        Self {
            version: version.into(),
            entries,
        }
    }

    /// Header line identifying this release in the changelog
    pub fn header(&self) -> String {
        format!("## {}", self.version)
    }

    /// Check if the section has any entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
