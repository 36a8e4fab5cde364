//! JSON file persistence with owner-only, replace-on-write semantics.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Generic key/value bag of a JSON object file.
pub type JsonObject = Map<String, Value>;

/// Read and deserialize a JSON file.
///
/// Returns `Ok(None)` when the file does not exist or is zero bytes long.
/// Any other read failure and any parse failure is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read {}", path.to_string_lossy()));
        }
    };
    if bytes.is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse {}", path.to_string_lossy()))?;
    Ok(Some(value))
}

/// Read a file holding a JSON object.
///
/// A literal `null` document reads as an empty object; any other non-object
/// document is an error.
pub fn read_json_object(path: &Path) -> Result<Option<JsonObject>> {
    match read_json::<Value>(path)? {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::Null) => Ok(Some(JsonObject::new())),
        Some(other) => Err(anyhow::anyhow!(
            "Expected a JSON object in {}, found {}",
            path.to_string_lossy(),
            json_kind(&other)
        )),
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
///
/// The content is written to a temporary file next to the target, restricted
/// to the owner, then renamed over the target. The parent directory must
/// already exist.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        anyhow::anyhow!("Invalid target path: {}", path.to_string_lossy())
    })?;

    let mut content = serde_json::to_vec_pretty(value).context("Failed to serialize JSON")?;
    content.push(b'\n');

    let mut temp_file = NamedTempFile::new_in(parent).with_context(|| {
        format!(
            "Failed to create temporary file in {}",
            parent.to_string_lossy()
        )
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))
            .with_context(|| {
                format!(
                    "Failed to restrict permissions on {}",
                    temp_file.path().to_string_lossy()
                )
            })?;
    }

    temp_file.write_all(&content).with_context(|| {
        format!(
            "Failed to write temporary file {}",
            temp_file.path().to_string_lossy()
        )
    })?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to flush temporary file")?;

    temp_file
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.to_string_lossy()))?;

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
