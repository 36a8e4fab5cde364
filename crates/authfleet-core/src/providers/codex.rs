//! OpenAI Codex token storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ProviderKind, ProviderTokenStorage};
use crate::error::{AccountError, Result};

/// OAuth token payload for a Codex account, keyed by the OpenAI account id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodexTokenStorage {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
    pub account_id: String,
    pub last_refresh: String,
    pub email: String,
    #[serde(rename = "expired")]
    pub expire: String,
}

impl ProviderTokenStorage for CodexTokenStorage {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Codex
    }

    fn account_id(&self) -> Result<String> {
        if self.account_id.is_empty() {
            return Err(AccountError::MissingField {
                provider: "codex",
                field: "account_id",
            });
        }
        Ok(self.account_id.clone())
    }

    fn token_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id_token", Value::from(self.id_token.as_str())),
            ("access_token", Value::from(self.access_token.as_str())),
            ("refresh_token", Value::from(self.refresh_token.as_str())),
            ("last_refresh", Value::from(self.last_refresh.as_str())),
            ("email", Value::from(self.email.as_str())),
            ("expired", Value::from(self.expire.as_str())),
        ]
    }
}
