//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for all read-only queries
//! that span the store and core layers. It accepts a shared (non-mutable)
//! connection and never writes to the ledger.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use scandiff_core::diff::engine::compare_snapshots;
use scandiff_core::diff::human_summary::render_human_summary;
use scandiff_core::diff::model::DiffReport;
use scandiff_core::errors::{ScanError, ScanErrorKind};
use scandiff_core::model::Snapshot;
use scandiff_core::{log_op_end, log_op_error, log_op_start};
use scandiff_store::errors::Result;
use scandiff_store::snapshot::query::{
    fetch_snapshot_row, list_hosts, list_snapshot_rows_by_host, SnapshotRow,
};

// ---------------------------------------------------------------------------
// Query and result types
// ---------------------------------------------------------------------------

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Compute a structured diff between two stored snapshots of one host.
    ///
    /// IDs may be passed in either order; the engine orders the pair
    /// chronologically before comparing.
    SnapshotDiff {
        /// Ledger ID of one snapshot
        first_id: i64,
        /// Ledger ID of the other snapshot
        second_id: i64,
    },
    /// Get a stored snapshot with its ledger metadata.
    SnapshotGet { snapshot_id: i64 },
    /// List ledger metadata for one host, newest scan first.
    SnapshotList { host: String },
    /// List all distinct host addresses in the ledger.
    HostList,
}

/// The structured + rendered result of a `SnapshotDiff` query.
#[derive(Debug, Clone)]
pub struct SnapshotDiffResult {
    /// Machine-readable structured report
    pub report: DiffReport,
    /// Human-readable Markdown summary
    pub human_summary: String,
}

/// A stored snapshot with its ledger metadata.
#[derive(Debug, Clone)]
pub struct SnapshotGetResult {
    pub snapshot_id: i64,
    pub filename: String,
    pub content_digest: String,
    pub uploaded_at: i64,
    pub snapshot: Snapshot,
}

/// Ledger metadata for one stored snapshot (no document payload).
#[derive(Debug, Clone)]
pub struct SnapshotListItem {
    pub snapshot_id: i64,
    pub timestamp: String,
    pub filename: String,
    pub uploaded_at: i64,
}

/// Results for each [`EngineQuery`] variant.
#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    /// Result of a `SnapshotDiff` query.
    SnapshotDiff(Box<SnapshotDiffResult>),
    /// Result of a `SnapshotGet` query.
    SnapshotGet(Box<SnapshotGetResult>),
    /// Result of a `SnapshotList` query.
    SnapshotList(Vec<SnapshotListItem>),
    /// Result of a `HostList` query.
    HostList(Vec<String>),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a ledger row to a typed snapshot, keeping the row's identity in
/// error context.
fn resolve_snapshot(conn: &Connection, snapshot_id: i64) -> Result<(SnapshotRow, Snapshot)> {
    let row = fetch_snapshot_row(conn, snapshot_id)?;
    let snapshot = row.clone().into_snapshot()?;
    Ok((row, snapshot))
}

/// Parse a stored RFC3339 timestamp for chronological comparison.
fn parse_timestamp(
    snapshot_id: i64,
    timestamp: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    chrono::DateTime::parse_from_rfc3339(timestamp).map_err(|e| {
        ScanError::new(ScanErrorKind::InvalidTimestamp)
            .with_op("snapshot_diff")
            .with_snapshot_id(snapshot_id)
            .with_message(format!("stored timestamp is not RFC3339: {}", e))
    })
}

// ---------------------------------------------------------------------------
// apply_engine_query
// ---------------------------------------------------------------------------

/// Apply a read-only engine query.
///
/// All branches use only `&Connection` (shared, non-mutable). Nothing is
/// written to the ledger.
///
/// # Errors
///
/// Error kinds depend on the query; see individual variant documentation.
pub fn apply_engine_query(query: EngineQuery, conn: &Connection) -> Result<EngineQueryResult> {
    match query {
        // ── SnapshotDiff ──────────────────────────────────────────────────────
        EngineQuery::SnapshotDiff {
            first_id,
            second_id,
        } => {
            log_op_start!("snapshot_diff", first_id = first_id, second_id = second_id);
            let start = std::time::Instant::now();

            let result = (|| -> Result<EngineQueryResult> {
                let (first_row, first) = resolve_snapshot(conn, first_id)?;
                let (second_row, second) = resolve_snapshot(conn, second_id)?;

                // Both snapshots must describe the same host; the comparison
                // is mechanically well-defined otherwise but meaningless.
                if first.ip != second.ip {
                    return Err(ScanError::new(ScanErrorKind::HostMismatch)
                        .with_op("snapshot_diff")
                        .with_host(first.ip.clone())
                        .with_message(format!(
                            "snapshots must be from the same host ({} vs {})",
                            first.ip, second.ip
                        )));
                }

                // Order the pair chronologically so callers can pass IDs in
                // either order. Ties keep the given order.
                let first_ts = parse_timestamp(first_row.snapshot_id, &first.timestamp)?;
                let second_ts = parse_timestamp(second_row.snapshot_id, &second.timestamp)?;
                let (old, new) = if first_ts > second_ts {
                    (&second, &first)
                } else {
                    (&first, &second)
                };

                let report = compare_snapshots(old, new);
                let human_summary = render_human_summary(&report);

                Ok(EngineQueryResult::SnapshotDiff(Box::new(
                    SnapshotDiffResult {
                        report,
                        human_summary,
                    },
                )))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("snapshot_diff", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("snapshot_diff", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        // ── SnapshotGet ───────────────────────────────────────────────────────
        EngineQuery::SnapshotGet { snapshot_id } => {
            log_op_start!("snapshot_get", snapshot_id = snapshot_id);
            let start = std::time::Instant::now();

            let result = (|| -> Result<EngineQueryResult> {
                let (row, snapshot) = resolve_snapshot(conn, snapshot_id)?;
                Ok(EngineQueryResult::SnapshotGet(Box::new(
                    SnapshotGetResult {
                        snapshot_id: row.snapshot_id,
                        filename: row.filename,
                        content_digest: row.content_digest,
                        uploaded_at: row.uploaded_at,
                        snapshot,
                    },
                )))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("snapshot_get", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("snapshot_get", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        // ── SnapshotList ──────────────────────────────────────────────────────
        EngineQuery::SnapshotList { host } => {
            log_op_start!("snapshot_list", host = %host);
            let start = std::time::Instant::now();

            let result = (|| -> Result<EngineQueryResult> {
                let rows = list_snapshot_rows_by_host(conn, &host)?;
                let items = rows
                    .into_iter()
                    .map(|row| SnapshotListItem {
                        snapshot_id: row.snapshot_id,
                        timestamp: row.timestamp,
                        filename: row.filename,
                        uploaded_at: row.uploaded_at,
                    })
                    .collect();
                Ok(EngineQueryResult::SnapshotList(items))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("snapshot_list", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("snapshot_list", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        // ── HostList ──────────────────────────────────────────────────────────
        EngineQuery::HostList => {
            log_op_start!("host_list");
            let start = std::time::Instant::now();

            let result = list_hosts(conn).map(EngineQueryResult::HostList);

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("host_list", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("host_list", e_clone, duration_ms = elapsed);
                }
            }
            result
        }
    }
}
