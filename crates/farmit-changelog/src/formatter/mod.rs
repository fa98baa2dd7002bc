//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::{ChangelogEntry, ReleaseSection};

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render a single entry, without a trailing newline
    fn format_entry(&self, entry: &ChangelogEntry) -> String;

    /// Render a release section ready to be prepended to the changelog
    fn format(&self, section: &ReleaseSection) -> String;

    /// Render the entries alone, as used in the release commit body
    fn body(&self, section: &ReleaseSection) -> String {
        section
            .entries
            .iter()
            .map(|entry| format!("{}\n", self.format_entry(entry)))
            .collect()
    }
}
