//! Changelog file on disk

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use farmit_core::error::ChangelogError;

/// Result of updating a changelog file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// File did not exist and was created
    Created,
    /// Section was prepended to the existing file
    Updated,
    /// File already had a section for this release
    AlreadyUpToDate,
}

/// Newest-first Markdown changelog
#[derive(Debug, Clone)]
pub struct ChangelogFile {
    path: PathBuf,
}

impl ChangelogFile {
    /// Changelog at `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the changelog
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Whether `header` occurs as a whole line in the changelog
    pub fn contains_header(&self, header: &str) -> Result<bool, ChangelogError> {
        if !self.exists() {
            return Ok(false);
        }
        let content = fs::read(&self.path)?;
        Ok(has_line(&content, header))
    }

    /// Put `section` at the top of the changelog.
    ///
    /// `header` identifies the release; when it is already present the
    /// file is left alone.
    #[instrument(skip(self, section), fields(path = %self.path.display()))]
    pub fn prepend(&self, section: &str, header: &str) -> Result<UpdateOutcome, ChangelogError> {
        if !self.exists() {
            warn!("{} does not exist, creating it", self.path.display());
            fs::write(&self.path, section)?;
            info!("changelog created");
            return Ok(UpdateOutcome::Created);
        }

        let existing = fs::read(&self.path)?;
        if has_line(&existing, header) {
            warn!("{} is already up to date", self.path.display());
            return Ok(UpdateOutcome::AlreadyUpToDate);
        }

        let mut combined = Vec::with_capacity(section.len() + existing.len());
        combined.extend_from_slice(section.as_bytes());
        combined.extend_from_slice(&existing);
        fs::write(&self.path, combined)?;

        info!("changelog updated");
        Ok(UpdateOutcome::Updated)
    }
}

/// Whole-line match on raw bytes; the file need not be UTF-8
fn has_line(content: &[u8], line: &str) -> bool {
    content
        .split(|&b| b == b'\n')
        .any(|l| l.trim_ascii_end() == line.as_bytes())
}
