//! Provider account writer.
//!
//! Creates or merges `<root>/<provider>-<account_id>.json`. Existing keys
//! survive every write unless the merge replaces them with a real value.

use authfleet_storage::{
    JsonObject, StoreConfig, ensure_private_dir, read_json_object, write_json_atomic,
};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

use super::types::{ACCOUNT_ID_FIELD, TYPE_FIELD};
use crate::error::{AccountError, Result};

/// Characters that would let a name leave the configuration root.
const PATH_UNSAFE: [char; 3] = ['/', '\\', '\0'];

/// Create or update the file for one `(provider, account_id)` pair.
///
/// `merge` receives the current fields (with `type` and `accountId` already
/// set) and returns the fields to persist. Returning `None` or an empty map
/// aborts the write and leaves the file untouched. Values the merge blanks
/// out (`""` or `null`) are restored from the existing file.
///
/// Returns the path of the written file.
pub fn save_provider_account<F>(
    config: &StoreConfig,
    provider: &str,
    account_id: &str,
    merge: F,
) -> Result<PathBuf>
where
    F: FnOnce(JsonObject) -> Option<JsonObject>,
{
    let provider = provider.trim().to_lowercase();
    if provider.is_empty() || account_id.trim().is_empty() {
        return Err(AccountError::MissingIdentity {
            provider,
            account_id: account_id.to_string(),
        });
    }
    if provider.contains(PATH_UNSAFE) {
        return Err(AccountError::InvalidProvider(provider));
    }
    if account_id.contains(PATH_UNSAFE) {
        return Err(AccountError::InvalidAccountId(account_id.to_string()));
    }

    ensure_private_dir(config.root())?;
    let path = config.account_file_path(&provider, account_id);

    let mut fields = match read_json_object(&path) {
        Ok(existing) => existing.unwrap_or_default(),
        Err(e) => {
            warn!(path = ?path, error = %e, "Existing account file is unreadable, rewriting it");
            JsonObject::new()
        }
    };
    set_identity(&mut fields, &provider, account_id);

    let before = fields.clone();
    let mut merged = merge(fields)
        .filter(|merged| !merged.is_empty())
        .ok_or_else(|| AccountError::EmptyMerge {
            provider: provider.clone(),
            account_id: account_id.to_string(),
        })?;

    for (key, previous) in &before {
        if is_blank(previous) {
            continue;
        }
        if merged.get(key).is_some_and(is_blank) {
            merged.insert(key.clone(), previous.clone());
        }
    }
    set_identity(&mut merged, &provider, account_id);

    write_json_atomic(&path, &merged)?;

    info!(provider = %provider, account_id = %account_id, path = ?path, "Saved provider account");
    Ok(path)
}

/// Copy `updates` into `fields`, skipping empty strings and nulls.
///
/// This is the merge step provider adapters share: a refresh that comes back
/// without a value never erases the stored one.
pub fn overlay_non_empty<I, K>(fields: &mut JsonObject, updates: I)
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    for (key, value) in updates {
        if is_blank(&value) {
            continue;
        }
        fields.insert(key.into(), value);
    }
}

fn set_identity(fields: &mut JsonObject, provider: &str, account_id: &str) {
    fields.insert(TYPE_FIELD.to_string(), Value::from(provider));
    fields.insert(ACCOUNT_ID_FIELD.to_string(), Value::from(account_id));
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn read(path: &std::path::Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_rejects_missing_identity() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path().join("store"));

        let err = save_provider_account(&config, "", "a", Some).unwrap_err();
        assert!(matches!(err, AccountError::MissingIdentity { .. }));

        let err = save_provider_account(&config, "codex", " ", Some).unwrap_err();
        assert!(matches!(err, AccountError::MissingIdentity { .. }));

        let err = save_provider_account(&config, "codex", "../escape", Some).unwrap_err();
        assert!(matches!(err, AccountError::InvalidAccountId(_)));

        for provider in ["../outside", "a/b", "a\\b", "nul\0"] {
            let err = save_provider_account(&config, provider, "acct", Some).unwrap_err();
            assert!(matches!(err, AccountError::InvalidProvider(_)), "{}", provider);
        }
        assert!(!temp_dir.path().join("outside-acct.json").exists());

        // Nothing was created
        assert!(!config.root().exists());
    }

    #[test]
    fn test_creates_file_with_identity() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path().join("store"));

        let path = save_provider_account(&config, "Claude", "User@Example.com", |mut fields| {
            fields.insert("access_token".to_string(), json!("tok"));
            Some(fields)
        })
        .unwrap();

        assert_eq!(path, config.root().join("claude-User@Example.com.json"));
        let written = read(&path);
        assert_eq!(written["type"], "claude");
        assert_eq!(written["accountId"], "User@Example.com");
        assert_eq!(written["access_token"], "tok");
    }

    #[test]
    fn test_merge_keeps_unrelated_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        let path = config.account_file_path("codex", "42");
        std::fs::write(
            &path,
            r#"{"type": "codex", "accountId": "42", "accountNickname": "work", "refresh_token": "r1"}"#,
        )
        .unwrap();

        save_provider_account(&config, "codex", "42", |mut fields| {
            overlay_non_empty(&mut fields, [("access_token", json!("a2"))]);
            Some(fields)
        })
        .unwrap();

        let written = read(&path);
        assert_eq!(written["accountNickname"], "work");
        assert_eq!(written["refresh_token"], "r1");
        assert_eq!(written["access_token"], "a2");
    }

    #[test]
    fn test_blank_values_do_not_erase() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        let path = config.account_file_path("qwen", "qwen");
        std::fs::write(&path, r#"{"X": "secret", "Y": "keep", "Z": ""}"#).unwrap();

        save_provider_account(&config, "qwen", "qwen", |mut fields| {
            fields.insert("X".to_string(), json!(""));
            fields.insert("Y".to_string(), Value::Null);
            fields.insert("Z".to_string(), json!("filled"));
            Some(fields)
        })
        .unwrap();

        let written = read(&path);
        assert_eq!(written["X"], "secret");
        assert_eq!(written["Y"], "keep");
        assert_eq!(written["Z"], "filled");
    }

    #[test]
    fn test_identity_fields_are_authoritative() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        let path = config.account_file_path("codex", "42");
        std::fs::write(&path, r#"{"type": "other", "accountId": "wrong"}"#).unwrap();

        save_provider_account(&config, "CODEX", "42", |mut fields| {
            assert_eq!(fields["type"], "codex");
            assert_eq!(fields["accountId"], "42");
            fields.insert("type".to_string(), json!("tampered"));
            Some(fields)
        })
        .unwrap();

        let written = read(&path);
        assert_eq!(written["type"], "codex");
        assert_eq!(written["accountId"], "42");
    }

    #[test]
    fn test_empty_merge_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        let path = config.account_file_path("claude", "a@example.com");
        std::fs::write(&path, r#"{"access_token": "old"}"#).unwrap();

        let err = save_provider_account(&config, "claude", "a@example.com", |_| None).unwrap_err();
        assert!(matches!(err, AccountError::EmptyMerge { .. }));

        let err = save_provider_account(&config, "claude", "a@example.com", |_| {
            Some(JsonObject::new())
        })
        .unwrap_err();
        assert!(matches!(err, AccountError::EmptyMerge { .. }));

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"access_token": "old"}"#
        );
    }

    #[test]
    fn test_corrupt_existing_file_is_rewritten() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        let path = config.account_file_path("gemini", "dev@example.com");
        std::fs::write(&path, "{{{").unwrap();

        save_provider_account(&config, "gemini", "dev@example.com", |mut fields| {
            fields.insert("project_id".to_string(), json!("p1"));
            Some(fields)
        })
        .unwrap();

        let written = read(&path);
        assert_eq!(written["project_id"], "p1");
        assert_eq!(written["type"], "gemini");
    }

    #[test]
    fn test_same_merge_twice_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path());
        let merge = |mut fields: JsonObject| {
            overlay_non_empty(
                &mut fields,
                [("access_token", json!("a")), ("checked", json!(true))],
            );
            Some(fields)
        };

        let path = save_provider_account(&config, "gemini", "dev", merge).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        save_provider_account(&config, "gemini", "dev", merge).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_overlay_non_empty() {
        let mut fields = JsonObject::new();
        fields.insert("keep".to_string(), json!("old"));

        overlay_non_empty(
            &mut fields,
            vec![
                ("keep", json!("")),
                ("none", Value::Null),
                ("flag", json!(false)),
                ("token", json!({"access_token": "x"})),
            ],
        );

        assert_eq!(fields["keep"], "old");
        assert!(!fields.contains_key("none"));
        assert_eq!(fields["flag"], false);
        assert_eq!(fields["token"]["access_token"], "x");
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::with_root(temp_dir.path().join("fresh"));

        let path = save_provider_account(&config, "codex", "1", Some).unwrap();

        let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);
        let dir_mode = std::fs::metadata(config.root()).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o077, 0);
    }
}
