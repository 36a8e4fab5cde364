//! AuthFleet Core - Multi-provider OAuth account store
//!
//! Keeps one JSON file per provider account in a configuration root and
//! answers "which account do I use right now" for each provider.
//!
//! # Modules
//!
//! - `accounts` - Loading, identity inference, resolution and persistence
//! - `providers` - Per-provider token payloads over the shared writer
//! - `store` - `AccountStore` facade bound to one `StoreConfig`
//!
//! Nothing is cached: every operation reads the directory again.

pub mod accounts;
pub mod error;
pub mod providers;
pub mod store;

pub use accounts::{AccountRecord, ActiveAccounts, ProviderCatalog, Resolution};
pub use authfleet_storage::{JsonObject, StoreConfig};
pub use error::{AccountError, Result};
pub use providers::{
    ClaudeTokenStorage, CodexTokenStorage, GeminiTokenStorage, ProviderKind,
    ProviderTokenStorage, QwenTokenStorage, TokenStorage,
};
pub use store::AccountStore;
