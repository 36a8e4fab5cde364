//! Store configuration.
//!
//! The configuration root is injected explicitly; `StoreConfig::from_env`
//! is the single bridge to environment and home-directory lookup.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::resolve_authfleet_dir;

const DEFAULT_CREDENTIAL_EXTENSION: &str = "json";
const DEFAULT_ACTIVE_ACCOUNTS_FILE: &str = "active-accounts.json";

/// Where account files live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding every account file and the active-account pointer.
    pub root: PathBuf,
    /// Extension (without the dot) of credential files.
    pub credential_extension: String,
    /// File name of the provider → preferred account pointer map.
    pub active_accounts_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            credential_extension: DEFAULT_CREDENTIAL_EXTENSION.to_string(),
            active_accounts_file: DEFAULT_ACTIVE_ACCOUNTS_FILE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Configuration rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Configuration rooted at `AUTHFLEET_DIR` or `~/.cli-proxy-api`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_root(resolve_authfleet_dir()?))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Configuration root must not be empty"));
        }

        if self.credential_extension.is_empty() || self.credential_extension.contains('.') {
            return Err(anyhow::anyhow!(
                "Credential extension must be non-empty and given without a dot, got '{}'",
                self.credential_extension
            ));
        }

        if self.file_base(&self.active_accounts_file).is_none() {
            return Err(anyhow::anyhow!(
                "Active accounts file '{}' must end with .{}",
                self.active_accounts_file,
                self.credential_extension
            ));
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file for one provider account: `<root>/<provider>-<id>.<ext>`.
    ///
    /// The caller is responsible for lowercasing the provider.
    pub fn account_file_path(&self, provider: &str, account_id: &str) -> PathBuf {
        self.root.join(format!(
            "{}-{}.{}",
            provider, account_id, self.credential_extension
        ))
    }

    pub fn active_accounts_path(&self) -> PathBuf {
        self.root.join(&self.active_accounts_file)
    }

    /// Strip the credential extension from a file name.
    ///
    /// Returns `None` when the name does not carry the extension.
    pub fn file_base<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.credential_extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    }
}
