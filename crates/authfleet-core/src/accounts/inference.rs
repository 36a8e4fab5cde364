//! Provider and account identity inference.
//!
//! Account files have been written under several conventions over time:
//! explicit `type`/`accountId` fields, `<provider>-<id>.json` file names, and
//! bare files that only carry a `type`. All of them must keep loading.

use authfleet_storage::JsonObject;

use super::types::{ACCOUNT_ID_FIELD, TYPE_FIELD, non_empty_str};

/// Derive `(provider, account_id)` for a file, first match wins:
///
/// 1. non-empty `type` and `accountId` fields
/// 2. file base split on its first `-`, both halves non-empty
/// 3. non-empty `type` field alone, with the whole file base as id
///
/// The provider is always lowercased. Returns `None` when no rule applies.
pub fn infer_provider_and_account_id(
    file_base: &str,
    fields: &JsonObject,
) -> Option<(String, String)> {
    let declared_type = non_empty_str(fields, TYPE_FIELD);

    if let Some(provider) = declared_type
        && let Some(account_id) = non_empty_str(fields, ACCOUNT_ID_FIELD)
    {
        return Some((provider.to_lowercase(), account_id.to_string()));
    }

    if let Some((provider, account_id)) = file_base.split_once('-')
        && !provider.is_empty()
        && !account_id.is_empty()
    {
        return Some((provider.to_lowercase(), account_id.to_string()));
    }

    declared_type.map(|provider| (provider.to_lowercase(), file_base.to_string()))
}
