//! Per-host access tokens used when pushing over HTTPS
//!
//! Tokens live in `~/.farmit/credentials.toml`:
//!
//! ```toml
//! [hosts."github.com"]
//! token = "ghp_..."
//! ```

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CredentialError;

/// Result type for credential operations
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Default host for `login` / `logout`
pub const DEFAULT_HOST: &str = "github.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    hosts: BTreeMap<String, HostCredential>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HostCredential {
    token: String,
}

/// File-backed token store
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at `~/.farmit/credentials.toml`
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(CredentialError::NoHomeDirectory)?;
        Ok(Self::at(home.join(".farmit").join("credentials.toml")))
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Token stored for a host, if any
    pub fn token(&self, host: &str) -> Result<Option<String>> {
        let file = self.read()?;
        Ok(file.hosts.get(host).map(|c| c.token.clone()))
    }

    /// Save a token for a host, replacing any previous one
    pub fn save(&self, host: &str, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CredentialError::EmptyToken(host.to_string()));
        }

        let mut file = self.read()?;
        file.hosts.insert(
            host.to_string(),
            HostCredential {
                token: token.to_string(),
            },
        );
        self.write(&file)?;

        info!(host, path = %self.path.display(), "stored credentials");
        Ok(())
    }

    /// Remove the token for a host. Returns whether one was stored.
    pub fn remove(&self, host: &str) -> Result<bool> {
        let mut file = self.read()?;
        let removed = file.hosts.remove(host).is_some();

        if removed {
            self.write(&file)?;
            info!(host, "removed credentials");
        } else {
            debug!(host, "no credentials to remove");
        }

        Ok(removed)
    }

    fn read(&self) -> Result<CredentialsFile> {
        if !self.path.exists() {
            return Ok(CredentialsFile::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn write(&self, file: &CredentialsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string(file)?;
        open_private(&self.path)?.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Open the token file for rewriting; it is mode 0600 before any byte is written
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.set_len(0)?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
