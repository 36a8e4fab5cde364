//! Anthropic Claude token storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ProviderKind, ProviderTokenStorage};
use crate::error::{AccountError, Result};

/// OAuth token payload for a Claude account. The account id is the email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaudeTokenStorage {
    /// JWT with the user's identity claims; kept in memory, never persisted
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
    pub last_refresh: String,
    pub email: String,
    /// Access token expiry, RFC 3339
    #[serde(rename = "expired")]
    pub expire: String,
}

impl ProviderTokenStorage for ClaudeTokenStorage {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn account_id(&self) -> Result<String> {
        if self.email.is_empty() {
            return Err(AccountError::MissingField {
                provider: "claude",
                field: "email",
            });
        }
        Ok(self.email.clone())
    }

    fn token_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("access_token", Value::from(self.access_token.as_str())),
            ("refresh_token", Value::from(self.refresh_token.as_str())),
            ("last_refresh", Value::from(self.last_refresh.as_str())),
            ("email", Value::from(self.email.as_str())),
            ("expired", Value::from(self.expire.as_str())),
        ]
    }
}
