//! farmit core - configuration, errors and version selection
//!
//! This crate provides the foundational types shared by the git, changelog
//! and CLI crates of farmit.

pub mod config;
pub mod credentials;
pub mod error;
pub mod version;

pub use credentials::CredentialStore;
pub use error::{FarmitError, Result};
pub use version::{BumpType, ReleaseRequest};
