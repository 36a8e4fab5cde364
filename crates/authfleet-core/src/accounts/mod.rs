//! Account catalog
//!
//! This module covers the whole life of an account file:
//! - Loading every credential file in the configuration root
//! - Inferring provider and account id across naming conventions
//! - Reading and updating the active-account pointer
//! - Resolving the active account for a provider
//! - Merge-on-write persistence

pub mod active;
pub mod inference;
pub mod loader;
pub mod resolver;
pub mod types;
pub mod writer;

pub use active::{load_active_accounts, set_active_account};
pub use inference::infer_provider_and_account_id;
pub use loader::load_all_accounts;
pub use resolver::{
    Resolution, resolve_active_account, resolve_active_account_at, resolve_with_status_at,
};
pub use types::{
    ACCOUNT_ID_FIELD, AccountRecord, ActiveAccounts, CREATED_AT_FIELD, EMAIL_FIELD,
    EXPIRED_FIELD, NICKNAME_FIELD, ProviderCatalog, TYPE_FIELD,
};
pub use writer::{overlay_non_empty, save_provider_account};
