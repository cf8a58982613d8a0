//! Snapshot persistence operations.
//!
//! Provides the transactional ledger insert with content-digest idempotency.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, OptionalExtension, Transaction};
use scandiff_core::errors::{ScanError, ScanErrorKind};
use scandiff_core::model::Snapshot;
use scandiff_core::snapshot::{canonical_json, content_digest};

/// Result of a snapshot insert operation.
#[derive(Debug, Clone)]
pub struct InsertResult {
    /// Ledger row ID of the stored snapshot
    pub snapshot_id: i64,
    /// SHA256 digest of the canonical snapshot JSON (hex, 64 characters)
    pub content_digest: String,
    /// Whether this was a duplicate (idempotent return)
    pub was_duplicate: bool,
}

/// Query for an existing ledger row by `(ip, timestamp)`.
///
/// Returns `(snapshot_id, content_digest)` when a row exists.
fn query_by_host_and_timestamp(
    tx: &Transaction,
    ip: &str,
    timestamp: &str,
) -> Result<Option<(i64, String)>> {
    tx.query_row(
        "SELECT id, content_digest FROM snapshots WHERE ip = ?1 AND timestamp = ?2",
        [ip, timestamp],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
    .map_err(from_rusqlite)
}

/// Insert a snapshot into the ledger atomically.
///
/// Serializes the snapshot to canonical JSON, computes its content digest,
/// and inserts a ledger row inside a transaction.
///
/// ## Idempotency
///
/// If a row already exists for the snapshot's `(ip, timestamp)` key:
/// - same content digest → the existing row is returned with
///   `was_duplicate = true` and nothing is written
/// - different content digest → `AlreadyExists` (the ledger is immutable;
///   a conflicting document for the same instant is a caller error)
///
/// ## Errors
///
/// - `ScanErrorKind::Serialization`: snapshot serialization failed
/// - `ScanErrorKind::AlreadyExists`: conflicting payload for `(ip, timestamp)`
/// - `ScanErrorKind::Persistence`: SQLite insert failed
pub fn insert_snapshot(
    conn: &mut Connection,
    snapshot: &Snapshot,
    filename: &str,
) -> Result<InsertResult> {
    let canonical = canonical_json(snapshot)?;
    let digest = content_digest(&canonical);

    let tx = conn.transaction().map_err(from_rusqlite)?;

    if let Some((existing_id, existing_digest)) =
        query_by_host_and_timestamp(&tx, &snapshot.ip, &snapshot.timestamp)?
    {
        if existing_digest == digest {
            tracing::debug!(
                snapshot_id = existing_id,
                host = %snapshot.ip,
                digest = %digest,
                "Snapshot with same content already exists (idempotent)"
            );
            return Ok(InsertResult {
                snapshot_id: existing_id,
                content_digest: digest,
                was_duplicate: true,
            });
        }
        return Err(ScanError::new(ScanErrorKind::AlreadyExists)
            .with_op("insert_snapshot")
            .with_host(snapshot.ip.clone())
            .with_snapshot_id(existing_id)
            .with_message(format!(
                "a different snapshot for {} at {} is already stored",
                snapshot.ip, snapshot.timestamp
            )));
    }

    let uploaded_at = chrono::Utc::now().timestamp_millis();
    tx.execute(
        r#"
        INSERT INTO snapshots (ip, timestamp, filename, content_digest, data, uploaded_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        rusqlite::params![
            snapshot.ip,
            snapshot.timestamp,
            filename,
            digest,
            canonical,
            uploaded_at,
        ],
    )
    .map_err(from_rusqlite)?;

    let snapshot_id = tx.last_insert_rowid();

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        snapshot_id = snapshot_id,
        host = %snapshot.ip,
        timestamp = %snapshot.timestamp,
        service_count = snapshot.services.len(),
        "Created snapshot ledger entry"
    );

    Ok(InsertResult {
        snapshot_id,
        content_digest: digest,
        was_duplicate: false,
    })
}
