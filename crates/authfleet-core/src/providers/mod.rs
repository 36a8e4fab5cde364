//! Provider token storage adapters
//!
//! Every provider persists its tokens through the same writer. What differs
//! is how the account id is derived and which token fields are overlaid:
//! - Claude: account id is the email
//! - Codex: account id is the OpenAI account id
//! - Gemini: account id is the email plus a normalized project suffix
//! - Qwen: a single account per installation

pub mod claude;
pub mod codex;
pub mod gemini;
pub mod qwen;

use authfleet_storage::{JsonObject, StoreConfig};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::accounts::{AccountRecord, overlay_non_empty, save_provider_account};
use crate::error::{AccountError, Result};

pub use claude::ClaudeTokenStorage;
pub use codex::CodexTokenStorage;
pub use gemini::{GeminiTokenStorage, gemini_credential_file_name};
pub use qwen::QwenTokenStorage;

/// Providers with a token storage adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Claude,
    Codex,
    Gemini,
    Qwen,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Claude,
        ProviderKind::Codex,
        ProviderKind::Gemini,
        ProviderKind::Qwen,
    ];

    /// Lowercase tag used in file names and the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::Codex => "codex",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Qwen => "qwen",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| AccountError::UnknownProvider(s.to_string()))
    }
}

/// Identity and merge strategy of one provider's token payload.
pub trait ProviderTokenStorage {
    fn kind(&self) -> ProviderKind;

    /// Derive the account id this payload is stored under.
    fn account_id(&self) -> Result<String>;

    /// Token fields to overlay on the stored file. Empty strings and nulls
    /// are skipped when merging.
    fn token_fields(&self) -> Vec<(&'static str, Value)>;

    /// Persist the payload, merging it into any existing account file.
    fn save(&self, config: &StoreConfig) -> Result<PathBuf> {
        let account_id = self.account_id()?;
        let updates = self.token_fields();
        save_provider_account(config, self.kind().as_str(), &account_id, |mut fields| {
            overlay_non_empty(&mut fields, updates);
            Some(fields)
        })
    }
}

/// Token payload of any supported provider.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStorage {
    Claude(ClaudeTokenStorage),
    Codex(CodexTokenStorage),
    Gemini(GeminiTokenStorage),
    Qwen(QwenTokenStorage),
}

impl TokenStorage {
    /// Read the typed payload back out of a loaded record.
    ///
    /// Fails with `UnknownProvider` for providers without an adapter.
    pub fn from_record(record: &AccountRecord) -> Result<Self> {
        let kind: ProviderKind = record.provider.parse()?;
        let mut storage = Self::from_fields(kind, &record.raw_fields)?;
        // Codex files written by the store carry the id only as `accountId`
        if let TokenStorage::Codex(codex) = &mut storage
            && codex.account_id.is_empty()
        {
            codex.account_id = record.account_id.clone();
        }
        Ok(storage)
    }

    pub fn from_fields(kind: ProviderKind, fields: &JsonObject) -> Result<Self> {
        let value = Value::Object(fields.clone());
        let storage = match kind {
            ProviderKind::Claude => TokenStorage::Claude(from_value(value)?),
            ProviderKind::Codex => TokenStorage::Codex(from_value(value)?),
            ProviderKind::Gemini => TokenStorage::Gemini(from_value(value)?),
            ProviderKind::Qwen => TokenStorage::Qwen(from_value(value)?),
        };
        Ok(storage)
    }

    fn inner(&self) -> &dyn ProviderTokenStorage {
        match self {
            TokenStorage::Claude(storage) => storage,
            TokenStorage::Codex(storage) => storage,
            TokenStorage::Gemini(storage) => storage,
            TokenStorage::Qwen(storage) => storage,
        }
    }
}

impl ProviderTokenStorage for TokenStorage {
    fn kind(&self) -> ProviderKind {
        self.inner().kind()
    }

    fn account_id(&self) -> Result<String> {
        self.inner().account_id()
    }

    fn token_fields(&self) -> Vec<(&'static str, Value)> {
        self.inner().token_fields()
    }
}

impl From<ClaudeTokenStorage> for TokenStorage {
    fn from(storage: ClaudeTokenStorage) -> Self {
        TokenStorage::Claude(storage)
    }
}

impl From<CodexTokenStorage> for TokenStorage {
    fn from(storage: CodexTokenStorage) -> Self {
        TokenStorage::Codex(storage)
    }
}

impl From<GeminiTokenStorage> for TokenStorage {
    fn from(storage: GeminiTokenStorage) -> Self {
        TokenStorage::Gemini(storage)
    }
}

impl From<QwenTokenStorage> for TokenStorage {
    fn from(storage: QwenTokenStorage) -> Self {
        TokenStorage::Qwen(storage)
    }
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| AccountError::Storage(anyhow::anyhow!("Failed to decode token payload: {}", e)))
}
