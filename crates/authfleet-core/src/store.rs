//! Account store facade.
//!
//! Binds the free functions in `accounts` to one validated `StoreConfig`.
//! Every call goes back to disk; the store holds no account state.

use authfleet_storage::{JsonObject, StoreConfig};
use chrono::Utc;
use std::path::PathBuf;
use tracing::debug;

use crate::accounts::{self, AccountRecord, ActiveAccounts, ProviderCatalog, Resolution};
use crate::error::Result;
use crate::providers::ProviderTokenStorage;

/// File-backed multi-provider account store.
#[derive(Debug, Clone)]
pub struct AccountStore {
    config: StoreConfig,
}

impl AccountStore {
    /// Create a store over `config`, rejecting invalid configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Store rooted at `AUTHFLEET_DIR` or `~/.cli-proxy-api`.
    pub fn from_env() -> Result<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load every account, grouped by provider.
    pub fn load_accounts(&self) -> Result<ProviderCatalog> {
        accounts::load_all_accounts(&self.config)
    }

    /// Accounts of a single provider in catalog order.
    pub fn provider_accounts(&self, provider: &str) -> Result<Vec<AccountRecord>> {
        let mut catalog = self.load_accounts()?;
        Ok(catalog.remove(&provider.to_lowercase()).unwrap_or_default())
    }

    pub fn active_accounts(&self) -> ActiveAccounts {
        accounts::load_active_accounts(&self.config)
    }

    /// Resolve the account to use for `provider` right now.
    ///
    /// `None` means no account file exists for the provider. The returned
    /// account may be expired when nothing fresher is available.
    pub fn resolve(&self, provider: &str) -> Result<Option<AccountRecord>> {
        Ok(self.resolve_with_status(provider)?.into_account())
    }

    /// Resolve the account for `provider`, telling fresh and expired apart.
    pub fn resolve_with_status(&self, provider: &str) -> Result<Resolution<AccountRecord>> {
        let records = self.provider_accounts(provider)?;
        let active = self.active_accounts();

        let resolution =
            accounts::resolve_with_status_at(provider, &records, &active, Utc::now()).cloned();
        debug!(
            provider = %provider,
            candidates = records.len(),
            account_id = ?resolution.account().map(|a| a.account_id.as_str()),
            fresh = resolution.is_fresh(),
            "Resolved active account"
        );
        Ok(resolution)
    }

    /// Create or merge the file for one provider account.
    pub fn save_account<F>(&self, provider: &str, account_id: &str, merge: F) -> Result<PathBuf>
    where
        F: FnOnce(JsonObject) -> Option<JsonObject>,
    {
        accounts::save_provider_account(&self.config, provider, account_id, merge)
    }

    /// Persist a provider token payload.
    pub fn save_token(&self, token: &dyn ProviderTokenStorage) -> Result<PathBuf> {
        token.save(&self.config)
    }

    /// Point `provider` at a preferred account.
    pub fn set_active_account(&self, provider: &str, hint: &str) -> Result<()> {
        accounts::set_active_account(&self.config, provider, hint)
    }
}
