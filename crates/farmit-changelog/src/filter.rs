//! Issue-tracker keyword and trailer filtering

use regex::Regex;
use tracing::debug;

use farmit_core::config::ChangelogConfig;
use farmit_core::error::ChangelogError;

/// Issue reference: `#123`, `owner/repo#123` or an issue/pull request URL
const ISSUE_REF: &str = r"(?:(?:[\w.-]+/[\w.-]+)?#\d+|https?://\S+/(?:issues|pull)/\d+)";

/// Drops description lines that are tracker directives rather than changes.
///
/// A line is dropped when it is a keyword followed by one or more issue
/// references (`Fixes #12`, `closes org/repo#3, #4`) or a trailer
/// (`Co-authored-by: ...`). Matching is case-insensitive and whole-line.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    directive: Option<Regex>,
    trailer: Option<Regex>,
}

impl KeywordFilter {
    /// Build a filter from keyword and trailer lists
    pub fn new<K, T>(keywords: &[K], trailers: &[T]) -> Result<Self, ChangelogError>
    where
        K: AsRef<str>,
        T: AsRef<str>,
    {
        let directive = alternation(keywords)
            .map(|alt| {
                Regex::new(&format!(
                    r"(?i)^(?:{alt})\s*:?\s*{ISSUE_REF}(?:\s*,?\s*(?:and\s+)?{ISSUE_REF})*\.?$"
                ))
            })
            .transpose()
            .map_err(|e| ChangelogError::InvalidFilter(e.to_string()))?;

        let trailer = alternation(trailers)
            .map(|alt| Regex::new(&format!(r"(?i)^(?:{alt})\s*:")))
            .transpose()
            .map_err(|e| ChangelogError::InvalidFilter(e.to_string()))?;

        debug!(
            keywords = keywords.len(),
            trailers = trailers.len(),
            "built keyword filter"
        );
        Ok(Self { directive, trailer })
    }

    /// Build the filter configured for a changelog
    pub fn from_config(config: &ChangelogConfig) -> Result<Self, ChangelogError> {
        Self::new(config.keywords.as_slice(), config.trailers.as_slice())
    }

    /// Whether a (trimmed) line must be excluded from the changelog
    pub fn is_excluded(&self, line: &str) -> bool {
        let line = line.trim();
        self.directive.as_ref().is_some_and(|re| re.is_match(line))
            || self.trailer.as_ref().is_some_and(|re| re.is_match(line))
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        let config = ChangelogConfig::default();
        // Built-in keywords are plain words and always compile
        Self::from_config(&config).unwrap_or(Self {
            directive: None,
            trailer: None,
        })
    }
}

/// Regex alternation of escaped words; inner whitespace matches any run of whitespace
fn alternation<S: AsRef<str>>(words: &[S]) -> Option<String> {
    let mut words: Vec<&str> = words
        .iter()
        .map(|w| w.as_ref().trim())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return None;
    }

    // Longest first so "fixes" is tried before "fix"
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));

    let escaped: Vec<String> = words
        .iter()
        .map(|w| {
            w.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();

    Some(escaped.join("|"))
}
