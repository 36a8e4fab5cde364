//! Active-account pointer file.

use authfleet_storage::{StoreConfig, ensure_private_dir, read_json, write_json_atomic};
use tracing::{debug, info};

use super::types::ActiveAccounts;
use crate::error::{AccountError, Result};

/// Load the provider → preferred account map.
///
/// A missing, empty or corrupt pointer file all read as "no preference".
pub fn load_active_accounts(config: &StoreConfig) -> ActiveAccounts {
    let path = config.active_accounts_path();
    match read_json::<ActiveAccounts>(&path) {
        Ok(Some(active)) => active,
        Ok(None) => ActiveAccounts::new(),
        Err(e) => {
            debug!(path = ?path, error = %e, "Ignoring unreadable active accounts file");
            ActiveAccounts::new()
        }
    }
}

/// Record `hint` as the preferred account for `provider`.
///
/// Entries for other providers are kept. A corrupt pointer file is
/// replaced by a fresh map.
pub fn set_active_account(config: &StoreConfig, provider: &str, hint: &str) -> Result<()> {
    let provider = provider.trim().to_lowercase();
    if provider.is_empty() || hint.trim().is_empty() {
        return Err(AccountError::MissingIdentity {
            provider,
            account_id: hint.to_string(),
        });
    }

    ensure_private_dir(config.root())?;

    let mut active = load_active_accounts(config);
    active.insert(provider.clone(), hint.to_string());
    write_json_atomic(&config.active_accounts_path(), &active)?;

    info!(provider = %provider, hint = %hint, "Active account updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_pointer_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());

        assert!(load_active_accounts(&config).is_empty());
    }

    #[test]
    fn test_corrupt_pointer_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());

        std::fs::write(config.active_accounts_path(), "{oops").unwrap();
        assert!(load_active_accounts(&config).is_empty());

        // Non-string values do not fit the map either
        std::fs::write(config.active_accounts_path(), r#"{"codex": 12}"#).unwrap();
        assert!(load_active_accounts(&config).is_empty());
    }

    #[test]
    fn test_load_pointer_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        std::fs::write(
            config.active_accounts_path(),
            r#"{"codex": "codex-1234", "claude": "user@example.com"}"#,
        )
        .unwrap();

        let active = load_active_accounts(&config);
        assert_eq!(active.len(), 2);
        assert_eq!(active["codex"], "codex-1234");
    }

    #[test]
    fn test_set_active_account_keeps_other_providers() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path().join("store"));

        set_active_account(&config, "Claude", "a@example.com").unwrap();
        set_active_account(&config, "codex", "42").unwrap();
        set_active_account(&config, "claude", "b@example.com").unwrap();

        let active = load_active_accounts(&config);
        assert_eq!(active.len(), 2);
        assert_eq!(active["claude"], "b@example.com");
        assert_eq!(active["codex"], "42");
    }

    #[test]
    fn test_set_active_account_recovers_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        std::fs::write(config.active_accounts_path(), "garbage").unwrap();

        set_active_account(&config, "qwen", "qwen").unwrap();

        let active = load_active_accounts(&config);
        assert_eq!(active.len(), 1);
        assert_eq!(active["qwen"], "qwen");
    }

    #[test]
    fn test_set_active_account_rejects_blank() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path().join("store"));

        assert!(set_active_account(&config, "", "x").is_err());
        assert!(set_active_account(&config, "codex", "  ").is_err());
        assert!(!config.root().exists());
    }
}
