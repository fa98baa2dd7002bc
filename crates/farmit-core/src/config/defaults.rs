//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "farmit.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "farmit.yaml";

/// Issue-tracker closing keywords
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "fix",
    "fixes",
    "fixed",
    "close",
    "closes",
    "closed",
    "resolve",
    "resolves",
    "resolved",
    "address",
    "addresses",
    "addressed",
    "part of",
];

/// Commit trailers that never belong in a changelog
pub const DEFAULT_TRAILERS: &[&str] = &["Co-authored-by", "Signed-off-by"];

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".farmit.toml",
        ".farmit.yaml",
    ]
}
