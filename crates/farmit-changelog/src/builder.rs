//! Commit message to changelog entry transformation

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use farmit_core::error::ChangelogError;

use crate::filter::KeywordFilter;
use crate::types::ChangelogEntry;

/// Markdown unordered list item: `*` or `-` followed by whitespace
static LIST_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*-](?:\s+(?P<text>.*))?$").expect("Invalid regex"));

/// Turns raw commit messages into changelog entries.
///
/// The title is the first non-empty line. Of the remaining lines only
/// Markdown list items survive, minus blank items and tracker directives
/// rejected by the [`KeywordFilter`].
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    filter: KeywordFilter,
}

impl EntryBuilder {
    /// Create a builder with a specific filter
    pub fn new(filter: KeywordFilter) -> Self {
        Self { filter }
    }

    /// Build the entry for one commit message
    pub fn build(&self, message: &str) -> Result<ChangelogEntry, ChangelogError> {
        let normalized = message.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = normalized.lines().map(str::trim);

        let title = lines
            .by_ref()
            .find(|l| !l.is_empty())
            .ok_or_else(|| {
                ChangelogError::InvalidCommitFormat("commit message has no title line".to_string())
            })?;

        let descriptions: Vec<String> = lines
            .filter_map(list_item_text)
            .filter(|text| !text.is_empty())
            .filter(|text| !self.filter.is_excluded(text))
            .map(str::to_string)
            .collect();

        Ok(ChangelogEntry::new(title).with_descriptions(descriptions))
    }

    /// Build entries for a sequence of messages, preserving order
    #[instrument(skip_all)]
    pub fn build_all<I, S>(&self, messages: I) -> Result<Vec<ChangelogEntry>, ChangelogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = messages
            .into_iter()
            .map(|m| self.build(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = entries.len(), "built changelog entries");
        Ok(entries)
    }
}

/// Text of a list item line, or `None` when the line is not a list item
fn list_item_text(line: &str) -> Option<&str> {
    let caps = LIST_ITEM_REGEX.captures(line)?;
    Some(caps.name("text").map_or("", |m| m.as_str().trim()))
}
