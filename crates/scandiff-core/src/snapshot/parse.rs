//! Snapshot byte parsing.
//!
//! The entry point is [`parse_snapshot_bytes`], which turns an uploaded JSON
//! document into a typed [`Snapshot`]. Malformed input is rejected here,
//! before it can reach the comparison engine.

#![allow(clippy::result_large_err)]

use crate::errors::{Result, ScanError, ScanErrorKind};
use crate::model::Snapshot;
use serde_json::Value;

/// Parse raw snapshot bytes into a typed `Snapshot` and the raw JSON `Value`.
///
/// The raw `Value` is returned alongside the typed snapshot so callers can
/// inspect fields outside the typed contract without a second parse.
///
/// # Errors
///
/// - `InvalidSnapshot` — bytes are not valid UTF-8, not valid JSON, the JSON
///   root is not an object, or typed deserialization fails
/// - `MissingField` — `ip`, `timestamp`, or `services` key absent
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<(Snapshot, Value)> {
    // 1. UTF-8 decode
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ScanError::new(ScanErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message(format!("snapshot is not valid UTF-8: {}", e))
    })?;

    // 2. JSON parse to generic Value
    let raw: Value = serde_json::from_str(text).map_err(|e| {
        ScanError::new(ScanErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message(format!("snapshot is not valid JSON: {}", e))
    })?;

    let obj = raw.as_object().ok_or_else(|| {
        ScanError::new(ScanErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message("snapshot JSON root must be an object")
    })?;

    // 3. Required keys must be present before typed deserialization so the
    //    caller gets a field-level error rather than a serde message
    for key in ["ip", "timestamp", "services"] {
        if !obj.contains_key(key) {
            return Err(ScanError::new(ScanErrorKind::MissingField)
                .with_op("parse_snapshot_bytes")
                .with_message(format!("required field `{}` is absent", key)));
        }
    }

    // 4. Full typed deserialization
    let snapshot: Snapshot = serde_json::from_value(raw.clone()).map_err(|e| {
        ScanError::new(ScanErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message(format!("failed to deserialize snapshot: {}", e))
    })?;

    Ok((snapshot, raw))
}
