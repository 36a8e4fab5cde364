//! Core types for the account catalog
//!
//! An account record pairs a handful of typed fields with the complete
//! key/value set it was loaded from, so a later write can merge without
//! dropping keys this crate does not know about.

use authfleet_storage::JsonObject;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider tag field, e.g. `"claude"`.
pub const TYPE_FIELD: &str = "type";
/// Provider-scoped account identifier field.
pub const ACCOUNT_ID_FIELD: &str = "accountId";
pub const NICKNAME_FIELD: &str = "accountNickname";
pub const EMAIL_FIELD: &str = "email";
/// Access token expiry, RFC 3339 with optional fractional seconds.
pub const EXPIRED_FIELD: &str = "expired";
pub const CREATED_AT_FIELD: &str = "createdAt";

/// One persisted credential file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Lowercase provider tag, never empty
    pub provider: String,
    /// Provider-scoped identifier (email, numeric id, or file name fallback)
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `None` means the account never expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// File name without extension the record was loaded from
    pub source_file_base: String,
    /// Every key/value pair of the file as loaded
    #[serde(skip)]
    pub raw_fields: JsonObject,
}

impl AccountRecord {
    /// Build a record from an inferred identity and the fields of its file.
    ///
    /// Typed fields with the wrong JSON type or an unparseable timestamp
    /// are left unset; they stay available in `raw_fields`.
    pub fn from_fields(
        provider: impl Into<String>,
        account_id: impl Into<String>,
        source_file_base: impl Into<String>,
        raw_fields: JsonObject,
    ) -> Self {
        Self {
            provider: provider.into(),
            account_id: account_id.into(),
            nickname: non_empty_str(&raw_fields, NICKNAME_FIELD).map(str::to_string),
            email: non_empty_str(&raw_fields, EMAIL_FIELD).map(str::to_string),
            expires_at: parse_timestamp(raw_fields.get(EXPIRED_FIELD)),
            created_at: parse_timestamp(raw_fields.get(CREATED_AT_FIELD)),
            source_file_base: source_file_base.into(),
            raw_fields,
        }
    }

    /// Check if the account has expired as of now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expired means an expiry strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp < now).unwrap_or(false)
    }

    /// Best label for showing the account to a person.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.account_id.as_str())
    }
}

/// Provider tag → records in file enumeration order.
pub type ProviderCatalog = BTreeMap<String, Vec<AccountRecord>>;

/// Provider tag → preferred account hint.
///
/// The hint may be an account id, a `<provider>-` prefixed account id, an
/// email, or a legacy file base.
pub type ActiveAccounts = BTreeMap<String, String>;

/// String value of `key` when present and non-empty.
pub(crate) fn non_empty_str<'a>(fields: &'a JsonObject, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
