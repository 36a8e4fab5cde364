//! Path utilities for AuthFleet directory resolution.
//!
//! This is the only place that consults the environment or the user's home
//! directory. Everything else receives the root through `StoreConfig`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default directory name under the user's home.
pub const AUTHFLEET_DIR: &str = ".cli-proxy-api";

/// Environment variable to override the AuthFleet directory.
pub const AUTHFLEET_DIR_ENV: &str = "AUTHFLEET_DIR";

/// Resolve the AuthFleet configuration directory.
/// Priority: AUTHFLEET_DIR env var > ~/.cli-proxy-api/
pub fn resolve_authfleet_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(AUTHFLEET_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(AUTHFLEET_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Create `dir` (and missing parents) readable only by the owner.
///
/// An already existing directory is left as is, permissions included.
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .with_context(|| format!("Failed to create directory {}", dir.to_string_lossy()))?;
    debug!(path = ?dir, "Created configuration directory");
    Ok(())
}
