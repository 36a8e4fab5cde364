//! Account directory loader.
//!
//! Scans the configuration root and turns every readable credential file
//! into an `AccountRecord`. Broken files are skipped, never fatal.

use authfleet_storage::{StoreConfig, read_json_object};
use std::io::ErrorKind;
use tracing::debug;

use super::inference::infer_provider_and_account_id;
use super::types::{AccountRecord, ProviderCatalog};
use crate::error::Result;

/// Load every account in the configuration root, grouped by provider.
///
/// A missing root yields an empty catalog. Files are visited in file name
/// order so repeated loads of the same directory produce the same catalog.
pub fn load_all_accounts(config: &StoreConfig) -> Result<ProviderCatalog> {
    let entries = match std::fs::read_dir(config.root()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = ?config.root(), "Account directory not found");
            return Ok(ProviderCatalog::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry?.path());
    }
    paths.sort();

    let mut catalog = ProviderCatalog::new();

    for path in paths {
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if file_name == config.active_accounts_file {
            continue;
        }
        let Some(base) = config.file_base(file_name) else {
            continue;
        };

        let fields = match read_json_object(&path) {
            Ok(Some(fields)) => fields,
            Ok(None) => {
                debug!(path = ?path, "Skipping empty account file");
                continue;
            }
            Err(e) => {
                debug!(path = ?path, error = %e, "Skipping unreadable account file");
                continue;
            }
        };

        let Some((provider, mut account_id)) = infer_provider_and_account_id(base, &fields)
        else {
            debug!(path = ?path, "Skipping account file without inferable provider");
            continue;
        };
        if account_id.is_empty() {
            account_id = base.to_string();
        }

        let record = AccountRecord::from_fields(provider.clone(), account_id, base, fields);
        catalog.entry(provider).or_default().push(record);
    }

    Ok(catalog)
}
