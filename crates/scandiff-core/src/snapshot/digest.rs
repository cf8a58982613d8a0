//! Snapshot content digests.
//!
//! The ledger keys idempotency on a SHA-256 digest of the canonical snapshot
//! JSON: re-ingesting the same document is a no-op, while a different payload
//! under the same `(host, timestamp)` key is a conflict.

#![allow(clippy::result_large_err)]

use crate::errors::{Result, ScanError, ScanErrorKind};
use crate::model::Snapshot;
use sha2::{Digest, Sha256};

/// Serialize a snapshot to its canonical JSON form.
///
/// Canonical means the typed model's own serialization: struct field order,
/// optional fields omitted. Two snapshots serialize identically iff they are
/// value-equal.
///
/// # Errors
///
/// - `Serialization` — JSON serialization failed
pub fn canonical_json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string(snapshot).map_err(|e| {
        ScanError::new(ScanErrorKind::Serialization)
            .with_op("canonical_json")
            .with_message(format!("failed to serialize snapshot: {}", e))
    })
}

/// Compute the SHA-256 content digest (hex, 64 chars) of canonical bytes.
pub fn content_digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
