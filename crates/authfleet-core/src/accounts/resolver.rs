//! Active account resolution.
//!
//! Picks exactly one account for a provider from the catalog and a possibly
//! stale hint. Pure: no I/O, the clock is the only input besides arguments.

use chrono::{DateTime, Utc};

use super::types::{AccountRecord, ActiveAccounts};

/// Outcome of resolution with the freshness of the picked account spelled out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<A> {
    /// A non-expired account was selected
    Fresh(A),
    /// Only an expired account was available; callers may still offer it
    /// for re-authentication
    Expired(A),
    /// No records at all
    Missing,
}

impl<A> Resolution<A> {
    pub fn account(&self) -> Option<&A> {
        match self {
            Resolution::Fresh(account) | Resolution::Expired(account) => Some(account),
            Resolution::Missing => None,
        }
    }

    pub fn into_account(self) -> Option<A> {
        match self {
            Resolution::Fresh(account) | Resolution::Expired(account) => Some(account),
            Resolution::Missing => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Resolution::Fresh(_))
    }
}

impl Resolution<&AccountRecord> {
    pub fn cloned(self) -> Resolution<AccountRecord> {
        match self {
            Resolution::Fresh(account) => Resolution::Fresh(account.clone()),
            Resolution::Expired(account) => Resolution::Expired(account.clone()),
            Resolution::Missing => Resolution::Missing,
        }
    }
}

/// Resolve the active account for `provider` as of now.
///
/// Returns `None` only when `records` is empty.
pub fn resolve_active_account<'a>(
    provider: &str,
    records: &'a [AccountRecord],
    active: &ActiveAccounts,
) -> Option<&'a AccountRecord> {
    resolve_active_account_at(provider, records, active, Utc::now())
}

/// Resolve the active account for `provider` with expiry judged at `now`.
///
/// Order, each step restricted to `provider` and scanning in catalog order:
///
/// 1. With a hint, among non-expired records: exact account id, then the
///    hint minus a `<provider>-` prefix, then email (case-insensitive), then
///    source file base (bare or minus its `<provider>-` prefix).
/// 2. The first non-expired record.
/// 3. The first record regardless of expiry.
pub fn resolve_active_account_at<'a>(
    provider: &str,
    records: &'a [AccountRecord],
    active: &ActiveAccounts,
    now: DateTime<Utc>,
) -> Option<&'a AccountRecord> {
    let first = records.first()?;

    let provider = provider.to_lowercase();
    let prefix = format!("{}-", provider);
    let hint = active.get(&provider).map(String::as_str).unwrap_or("");

    let pick = |filter: &dyn Fn(&AccountRecord) -> bool| {
        records
            .iter()
            .filter(|record| record.provider.to_lowercase() == provider)
            .find(|&record| filter(record))
    };
    let fresh = |record: &AccountRecord| !record.is_expired_at(now);

    if !hint.is_empty() {
        if let Some(account) = pick(&|r| fresh(r) && r.account_id == hint) {
            return Some(account);
        }

        if let Some(trimmed) = hint.strip_prefix(&prefix)
            && let Some(account) = pick(&|r| fresh(r) && r.account_id == trimmed)
        {
            return Some(account);
        }

        if let Some(account) = pick(&|r| {
            fresh(r)
                && r.email
                    .as_deref()
                    .is_some_and(|email| !email.is_empty() && eq_ignore_case(email, hint))
        }) {
            return Some(account);
        }

        if let Some(account) = pick(&|r| {
            fresh(r)
                && (r.source_file_base == hint
                    || r.source_file_base.strip_prefix(&prefix) == Some(hint))
        }) {
            return Some(account);
        }
    }

    if let Some(account) = pick(&fresh) {
        return Some(account);
    }

    Some(pick(&|_| true).unwrap_or(first))
}

/// Like [`resolve_active_account_at`], reporting whether the pick is usable.
pub fn resolve_with_status_at<'a>(
    provider: &str,
    records: &'a [AccountRecord],
    active: &ActiveAccounts,
    now: DateTime<Utc>,
) -> Resolution<&'a AccountRecord> {
    match resolve_active_account_at(provider, records, active, now) {
        Some(account) if account.is_expired_at(now) => Resolution::Expired(account),
        Some(account) => Resolution::Fresh(account),
        None => Resolution::Missing,
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
