//! Changelog generation

use farmit_core::config::ChangelogConfig;
use farmit_core::error::ChangelogError;
use farmit_git::CommitInfo;
use tracing::{debug, info, instrument};

use crate::builder::EntryBuilder;
use crate::filter::KeywordFilter;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::types::{ChangelogEntry, ReleaseSection};

/// Changelog generator
pub struct ChangelogGenerator {
    builder: EntryBuilder,
    formatter: Box<dyn ChangelogFormatter>,
}

impl ChangelogGenerator {
    /// Create a generator using the configured keywords and trailers
    pub fn new(config: &ChangelogConfig) -> Result<Self, ChangelogError> {
        Ok(Self {
            builder: EntryBuilder::new(KeywordFilter::from_config(config)?),
            formatter: Box::new(MarkdownFormatter::new()),
        })
    }

    /// Build the release section for `commits`, keeping their order
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(
        &self,
        version: &str,
        commits: &[CommitInfo],
    ) -> Result<ReleaseSection, ChangelogError> {
        info!(version, commit_count = commits.len(), "generating changelog section");

        let entries = commits
            .iter()
            .map(|commit| self.entry_for(commit))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(entry_count = entries.len(), "changelog entries built");
        Ok(ReleaseSection::new(version, entries))
    }

    fn entry_for(&self, commit: &CommitInfo) -> Result<ChangelogEntry, ChangelogError> {
        self.builder
            .build(&commit.message)
            .map(|entry| entry.with_commit(&commit.hash))
            .map_err(|e| match e {
                ChangelogError::InvalidCommitFormat(reason) => ChangelogError::InvalidCommitFormat(
                    format!("commit {}: {}", commit.short_hash, reason),
                ),
                other => other,
            })
    }

    /// Format a release section for the changelog file
    pub fn format(&self, section: &ReleaseSection) -> String {
        self.formatter.format(section)
    }

    /// Format the entries of a section for the release commit body
    pub fn body(&self, section: &ReleaseSection) -> String {
        self.formatter.body(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_commit(hash: &str, message: &str) -> CommitInfo {
        CommitInfo::new(hash, message, "Test Author", Utc::now())
    }

    #[test]
    fn test_generate_section() {
        let generator = ChangelogGenerator::new(&ChangelogConfig::default()).unwrap();
        let commits = vec![
            make_commit("bbbbbbb1234", "Second commit"),
            make_commit(
                "aaaaaaa1234",
                "Title line\n\n* Description 1\n* Description 2\n\nFixes #1234",
            ),
        ];

        let section = generator.generate("1.0.1", &commits).unwrap();

        assert_eq!(section.version, "1.0.1");
        assert_eq!(section.entries.len(), 2);
        assert_eq!(section.entries[0].title, "Second commit");
        assert_eq!(section.entries[0].commit.as_deref(), Some("bbbbbbb1234"));
        assert_eq!(
            generator.format(&section),
            "## 1.0.1\n\n+ Second commit\n+ Title line\n  * Description 1\n  * Description 2\n\n"
        );
        assert_eq!(
            generator.body(&section),
            "+ Second commit\n+ Title line\n  * Description 1\n  * Description 2\n"
        );
    }

    #[test]
    fn test_generate_without_commits() {
        let generator = ChangelogGenerator::new(&ChangelogConfig::default()).unwrap();
        let section = generator.generate("1.0.1", &[]).unwrap();
        assert!(section.is_empty());
        assert_eq!(generator.format(&section), "");
    }

    #[test]
    fn test_invalid_commit_names_the_commit() {
        let generator = ChangelogGenerator::new(&ChangelogConfig::default()).unwrap();
        let commits = vec![make_commit("deadbeef0000", "\n\n")];

        match generator.generate("1.0.1", &commits) {
            Err(ChangelogError::InvalidCommitFormat(reason)) => {
                assert!(reason.contains("deadbee"), "{reason}");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_configured_keywords() {
        let config = ChangelogConfig {
            keywords: vec!["jira".to_string()],
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(&config).unwrap();
        let commits = vec![make_commit("abc1234", "Title\n\n* jira #5\n* Fixes #6")];

        let section = generator.generate("2.0.0", &commits).unwrap();
        assert_eq!(section.entries[0].descriptions, vec!["Fixes #6"]);
    }
}
