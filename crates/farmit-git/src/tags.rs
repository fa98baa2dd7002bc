//! Tag operations

use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(&name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag
                let mut tag_info = TagInfo::new(&name, tag.target_id().to_string());
                if let Some(msg) = tag.message() {
                    tag_info = tag_info.with_message(msg);
                }
                tags.push(tag_info);
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Find the latest tag by semantic version
    #[instrument(skip(self))]
    pub fn find_latest_tag(&self) -> Result<Option<TagInfo>> {
        let mut versioned_tags: Vec<_> = self
            .tags()?
            .into_iter()
            .filter(|t| t.version.is_some())
            .collect();

        versioned_tags.sort_by(|a, b| b.version.cmp(&a.version));

        let result = versioned_tags.into_iter().next();
        debug!(latest = ?result.as_ref().map(|t| &t.name), "found latest tag");
        Ok(result)
    }
}
