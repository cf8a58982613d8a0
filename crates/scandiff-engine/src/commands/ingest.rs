//! Snapshot ingest command.
//!
//! The only write path in the engine: parse uploaded bytes, enforce the
//! data-quality rules, then hand off to the ledger.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use scandiff_core::errors::ScanError;
use scandiff_core::rules::validate_snapshot;
use scandiff_core::snapshot::parse_snapshot_bytes;
use scandiff_core::{log_op_end, log_op_error, log_op_start};
use scandiff_store::errors::Result;
use scandiff_store::snapshot::insert_snapshot;

/// Result of a snapshot ingest operation.
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Ledger row ID of the stored snapshot
    pub snapshot_id: i64,
    /// Host address of the snapshot
    pub ip: String,
    /// RFC3339 scan timestamp
    pub timestamp: String,
    /// Number of services in the inventory
    pub service_count: usize,
    /// SHA256 digest of the canonical snapshot JSON
    pub content_digest: String,
    /// Whether an identical snapshot was already stored
    pub was_duplicate: bool,
}

/// Ingest a snapshot document into the ledger.
///
/// Pipeline: parse bytes → validate rules → transactional insert. Malformed
/// or rule-violating documents are rejected here, before anything touches
/// the comparison engine or the ledger.
///
/// # Errors
///
/// - `InvalidSnapshot` / `MissingField` — bytes fail parsing
/// - `InvalidHost` / `InvalidTimestamp` / `DuplicatePort` — validation rules
/// - `AlreadyExists` — conflicting payload for the same `(host, timestamp)`
/// - `Persistence` / `Serialization` — ledger write failed
pub fn ingest_snapshot(conn: &mut Connection, bytes: &[u8], filename: &str) -> Result<IngestResult> {
    log_op_start!("ingest_snapshot", filename = filename);
    let start = std::time::Instant::now();

    let result = (|| -> Result<IngestResult> {
        let (snapshot, _raw) = parse_snapshot_bytes(bytes)?;
        validate_snapshot(&snapshot).map_err(ScanError::from)?;

        let stored = insert_snapshot(conn, &snapshot, filename)?;

        Ok(IngestResult {
            snapshot_id: stored.snapshot_id,
            ip: snapshot.ip,
            timestamp: snapshot.timestamp,
            service_count: snapshot.services.len(),
            content_digest: stored.content_digest,
            was_duplicate: stored.was_duplicate,
        })
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(r) => log_op_end!(
            "ingest_snapshot",
            duration_ms = elapsed,
            snapshot_id = r.snapshot_id,
            host = %r.ip,
            service_count = r.service_count,
        ),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("ingest_snapshot", e_clone, duration_ms = elapsed);
        }
    }
    result
}
