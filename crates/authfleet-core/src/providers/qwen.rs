//! Alibaba Qwen token storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ProviderKind, ProviderTokenStorage};
use crate::error::Result;

/// Qwen has no multi-account concept; every payload maps to one file.
const QWEN_ACCOUNT_ID: &str = "qwen";

/// OAuth token payload for the Qwen account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QwenTokenStorage {
    pub access_token: String,
    pub refresh_token: String,
    pub last_refresh: String,
    /// Base URL for API requests
    pub resource_url: String,
    pub email: String,
    #[serde(rename = "expired")]
    pub expire: String,
}

impl ProviderTokenStorage for QwenTokenStorage {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Qwen
    }

    fn account_id(&self) -> Result<String> {
        Ok(QWEN_ACCOUNT_ID.to_string())
    }

    fn token_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("access_token", Value::from(self.access_token.as_str())),
            ("refresh_token", Value::from(self.refresh_token.as_str())),
            ("last_refresh", Value::from(self.last_refresh.as_str())),
            ("resource_url", Value::from(self.resource_url.as_str())),
            ("expired", Value::from(self.expire.as_str())),
        ]
    }
}
