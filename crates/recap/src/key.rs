use std::fmt::Write;

use recap_core::RecapError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Build a stable cache key for an operation and its arguments.
///
/// The argument tuple is serialized to canonical JSON and hashed; the
/// operation name prefixes the digest so distinct operations never share
/// keys. Keys are stable across runs for identical inputs.
pub fn cache_key<T: Serialize>(op: &str, args: &T) -> Result<String, RecapError> {
    let canonical = serde_json::to_string(args)
        .map_err(|e| RecapError::Cache(format!("failed to serialize cache key: {e}")))?;
    let digest = Sha256::digest(canonical.as_bytes());

    let mut key = String::with_capacity(op.len() + 1 + 64);
    key.push_str(op);
    key.push(':');
    for byte in digest {
        let _ = write!(key, "{byte:02x}");
    }
    Ok(key)
}
