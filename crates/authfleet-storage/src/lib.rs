//! AuthFleet Storage - Low-level file layer
//!
//! This crate resolves the configuration root and reads/writes the JSON
//! files that live in it. It knows nothing about providers or accounts; the
//! account model lives in `authfleet-core`.
//!
//! # Layout
//!
//! - `<root>/<provider>-<account>.json` - One credential file per account
//! - `<root>/active-accounts.json` - Provider to preferred account pointer

pub mod config;
pub mod json_file;
pub mod paths;

pub use config::StoreConfig;
pub use json_file::{JsonObject, read_json, read_json_object, write_json_atomic};
pub use paths::{AUTHFLEET_DIR, AUTHFLEET_DIR_ENV, ensure_private_dir, resolve_authfleet_dir};
