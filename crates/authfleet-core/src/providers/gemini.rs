//! Google Gemini token storage.
//!
//! One Google login can back several Cloud projects, so the account id
//! carries the project as a suffix: `<email>-<project>`. A project list or
//! the literal `ALL` collapses to `all`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ProviderKind, ProviderTokenStorage};
use crate::error::{AccountError, Result};

/// OAuth token payload for a Gemini account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiTokenStorage {
    /// Raw OAuth2 token object as returned by Google
    pub token: Value,
    pub project_id: String,
    pub email: String,
    /// Whether the project was picked automatically
    pub auto: bool,
    /// Whether the Cloud AI API was verified as enabled
    pub checked: bool,
}

impl ProviderTokenStorage for GeminiTokenStorage {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn account_id(&self) -> Result<String> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AccountError::MissingField {
                provider: "gemini",
                field: "email",
            });
        }

        match normalized_project(&self.project_id) {
            Some(project) => Ok(format!("{}-{}", email, project)),
            None => Ok(email.to_string()),
        }
    }

    fn token_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("token", self.token.clone()),
            ("project_id", Value::from(self.project_id.as_str())),
            ("email", Value::from(self.email.as_str())),
            ("auto", Value::from(self.auto)),
            ("checked", Value::from(self.checked)),
        ]
    }
}

/// File name used by the Gemini CLI login flow for a credential.
///
/// Multi-project selections always get the `gemini-` prefix and an `all`
/// suffix so web and CLI logins land in the same file.
pub fn gemini_credential_file_name(email: &str, project_id: &str, include_prefix: bool) -> String {
    let email = email.trim();
    let project = project_id.trim();
    if is_multi_project(project) {
        return format!("gemini-{}-all.json", email);
    }
    let prefix = if include_prefix { "gemini-" } else { "" };
    format!("{}{}-{}.json", prefix, email, project)
}

fn normalized_project(project_id: &str) -> Option<&str> {
    let project = project_id.trim();
    if project.is_empty() {
        None
    } else if is_multi_project(project) {
        Some("all")
    } else {
        Some(project)
    }
}

fn is_multi_project(project: &str) -> bool {
    project.eq_ignore_ascii_case("all") || project.contains(',')
}
