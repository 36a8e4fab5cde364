//! Account store error types.

use thiserror::Error;

/// Errors surfaced by account store operations.
///
/// Malformed account and pointer files never show up here; they are skipped
/// or read as empty state.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("provider and account id are required (provider: '{provider}', account id: '{account_id}')")]
    MissingIdentity {
        provider: String,
        account_id: String,
    },

    #[error("provider '{0}' cannot be used as a file name")]
    InvalidProvider(String),

    #[error("account id '{0}' cannot be used as a file name")]
    InvalidAccountId(String),

    #[error("merge for {provider}/{account_id} produced no fields")]
    EmptyMerge {
        provider: String,
        account_id: String,
    },

    #[error("{field} is required for {provider} account identification")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("account directory access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AccountError>;
