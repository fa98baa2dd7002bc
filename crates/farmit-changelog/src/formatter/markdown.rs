//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ChangelogEntry, ReleaseSection};

/// Markdown changelog formatter.
///
/// Entries render as `+ Title` with each description on its own
/// `  * text` line. A section is the `## <version>` header, a blank line,
/// then every entry followed by a newline, then a blank separator line.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn format_entry(&self, entry: &ChangelogEntry) -> String {
        let mut output = format!("+ {}", entry.title);
        for description in &entry.descriptions {
            output.push_str("\n  * ");
            output.push_str(description);
        }
        output
    }

    #[instrument(
        skip(self, section),
        fields(version = %section.version, entry_count = section.entries.len())
    )]
    fn format(&self, section: &ReleaseSection) -> String {
        if section.is_empty() {
            return String::new();
        }

        let mut output = format!("{}\n\n", section.header());
        output.push_str(&self.body(section));
        output.push('\n');

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }
}
