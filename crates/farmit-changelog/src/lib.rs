//! Farmit Changelog - changelog entries from commit messages
//!
//! Turns the commits of a release into `+ Title` entries, renders the
//! release section and prepends it to the changelog file.

pub mod builder;
pub mod document;
pub mod filter;
pub mod formatter;
pub mod generator;
pub mod types;

pub use builder::EntryBuilder;
pub use document::{ChangelogFile, UpdateOutcome};
pub use filter::KeywordFilter;
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::ChangelogGenerator;
pub use types::{ChangelogEntry, ReleaseSection};
