//! Exit codes for the CLI

/// Success, dry runs included
pub const SUCCESS: u8 = 0;

/// Release, git or changelog failure
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;
