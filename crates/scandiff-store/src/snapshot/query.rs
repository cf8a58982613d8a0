//! Read-only snapshot ledger queries.
//!
//! Provides functions for resolving ledger rows by ID, listing a host's
//! history, and enumerating known hosts, without mutating any state.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, OptionalExtension};
use scandiff_core::errors::{ScanError, ScanErrorKind};
use scandiff_core::model::Snapshot;

/// A raw row from the `snapshots` ledger table.
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    /// Ledger row ID
    pub snapshot_id: i64,
    /// Host address
    pub ip: String,
    /// RFC3339 scan timestamp
    pub timestamp: String,
    /// Filename the snapshot was ingested from
    pub filename: String,
    /// SHA256 digest of the stored snapshot JSON
    pub content_digest: String,
    /// Stored snapshot JSON document
    pub data: String,
    /// Upload time, milliseconds since epoch
    pub uploaded_at: i64,
}

impl SnapshotRow {
    /// Decode the stored JSON document into a typed [`Snapshot`].
    ///
    /// # Errors
    ///
    /// - `Serialization` — the stored document no longer deserializes
    ///   (ledger corruption; rows are written from the typed model)
    pub fn into_snapshot(self) -> Result<Snapshot> {
        serde_json::from_str(&self.data).map_err(|e| {
            ScanError::new(ScanErrorKind::Serialization)
                .with_op("into_snapshot")
                .with_snapshot_id(self.snapshot_id)
                .with_message(format!("failed to decode stored snapshot: {}", e))
        })
    }
}

/// Fetch a full `SnapshotRow` by ledger ID.
///
/// # Errors
///
/// - `NotFound` — no row with the given ID exists
/// - `Persistence` — SQLite read failed
pub fn fetch_snapshot_row(conn: &Connection, snapshot_id: i64) -> Result<SnapshotRow> {
    conn.query_row(
        "SELECT id, ip, timestamp, filename, content_digest, data, uploaded_at
         FROM snapshots WHERE id = ?1",
        [snapshot_id],
        row_to_snapshot_row,
    )
    .optional()
    .map_err(from_rusqlite)?
    .ok_or_else(|| {
        ScanError::new(ScanErrorKind::NotFound)
            .with_op("fetch_snapshot_row")
            .with_snapshot_id(snapshot_id)
            .with_message("snapshot not found")
    })
}

/// List all ledger rows for one host, newest scan first.
pub fn list_snapshot_rows_by_host(conn: &Connection, ip: &str) -> Result<Vec<SnapshotRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, ip, timestamp, filename, content_digest, data, uploaded_at
             FROM snapshots
             WHERE ip = ?1
             ORDER BY timestamp DESC, id DESC",
        )
        .map_err(from_rusqlite)?;
    let result: std::result::Result<Vec<_>, _> = stmt
        .query_map([ip], row_to_snapshot_row)
        .map_err(from_rusqlite)?
        .collect();
    result.map_err(from_rusqlite)
}

/// List all distinct host addresses in the ledger, ascending.
pub fn list_hosts(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT ip FROM snapshots ORDER BY ip")
        .map_err(from_rusqlite)?;
    let result: std::result::Result<Vec<String>, _> = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect();
    result.map_err(from_rusqlite)
}

fn row_to_snapshot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SnapshotRow> {
    Ok(SnapshotRow {
        snapshot_id: row.get(0)?,
        ip: row.get(1)?,
        timestamp: row.get(2)?,
        filename: row.get(3)?,
        content_digest: row.get(4)?,
        data: row.get(5)?,
        uploaded_at: row.get(6)?,
    })
}
