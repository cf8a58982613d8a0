//! Integration tests for the ingest command and the diff query surface.
//!
//! All tests use a real SQLite DB via TempDir.

use rusqlite::Connection;
use scandiff_core::errors::ScanErrorKind;
use scandiff_engine::commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult,
};
use scandiff_engine::commands::ingest::ingest_snapshot;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn setup() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let mut conn = Connection::open(&db_path).unwrap();
    scandiff_store::migrations::apply_migrations(&mut conn).unwrap();
    (temp_dir, conn)
}

fn ingest(conn: &mut Connection, document: serde_json::Value) -> i64 {
    ingest_snapshot(conn, document.to_string().as_bytes(), "scan.json")
        .unwrap()
        .snapshot_id
}

fn http_only(timestamp: &str) -> serde_json::Value {
    serde_json::json!({
        "ip": "192.0.2.7",
        "timestamp": timestamp,
        "services": [{"port": 80, "protocol": "HTTP"}],
        "service_count": 1
    })
}

fn http_and_https(timestamp: &str) -> serde_json::Value {
    serde_json::json!({
        "ip": "192.0.2.7",
        "timestamp": timestamp,
        "services": [
            {"port": 80, "protocol": "HTTP"},
            {"port": 443, "protocol": "HTTPS"}
        ],
        "service_count": 2
    })
}

fn diff(conn: &Connection, first_id: i64, second_id: i64) -> scandiff_core::DiffReport {
    match apply_engine_query(
        EngineQuery::SnapshotDiff {
            first_id,
            second_id,
        },
        conn,
    )
    .unwrap()
    {
        EngineQueryResult::SnapshotDiff(r) => r.report,
        other => panic!("expected SnapshotDiff result, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

#[test]
fn test_ingest_stores_snapshot() {
    let (_tmp, mut conn) = setup();
    let result =
        ingest_snapshot(&mut conn, http_only("2026-03-01T12:00:00Z").to_string().as_bytes(), "scan.json")
            .unwrap();

    assert_eq!(result.ip, "192.0.2.7");
    assert_eq!(result.service_count, 1);
    assert!(!result.was_duplicate);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_ingest_rejects_duplicate_ports() {
    let (_tmp, mut conn) = setup();
    let document = serde_json::json!({
        "ip": "192.0.2.7",
        "timestamp": "2026-03-01T12:00:00Z",
        "services": [
            {"port": 80, "protocol": "HTTP"},
            {"port": 80, "protocol": "HTTP-ALT"}
        ]
    });

    let err = ingest_snapshot(&mut conn, document.to_string().as_bytes(), "scan.json").unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::DuplicatePort);
    assert_eq!(err.port(), Some(80));
}

#[test]
fn test_ingest_rejects_malformed_document() {
    let (_tmp, mut conn) = setup();
    let err = ingest_snapshot(&mut conn, b"{not json", "scan.json").unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::InvalidSnapshot);
}

#[test]
fn test_ingest_rejects_missing_timestamp() {
    let (_tmp, mut conn) = setup();
    let document = serde_json::json!({"ip": "192.0.2.7", "services": []});
    let err = ingest_snapshot(&mut conn, document.to_string().as_bytes(), "scan.json").unwrap_err();
    assert_eq!(err.kind(), ScanErrorKind::MissingField);
}

#[test]
fn test_reingest_is_idempotent() {
    let (_tmp, mut conn) = setup();
    let document = http_only("2026-03-01T12:00:00Z");

    let first = ingest_snapshot(&mut conn, document.to_string().as_bytes(), "a.json").unwrap();
    let second = ingest_snapshot(&mut conn, document.to_string().as_bytes(), "b.json").unwrap();

    assert!(second.was_duplicate);
    assert_eq!(first.snapshot_id, second.snapshot_id);
}

// ---------------------------------------------------------------------------
// SnapshotDiff query
// ---------------------------------------------------------------------------

#[test]
fn test_diff_added_port_end_to_end() {
    let (_tmp, mut conn) = setup();
    let old_id = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    let new_id = ingest(&mut conn, http_and_https("2026-03-02T12:00:00Z"));

    let report = diff(&conn, old_id, new_id);

    assert!(report.has_changes);
    assert_eq!(report.ports_added.len(), 1);
    assert_eq!(report.ports_added[0].port, 443);
    assert!(report.ports_removed.is_empty());
    assert!(report.services_changed.is_empty());
    assert_eq!(report.old_snapshot.timestamp, "2026-03-01T12:00:00Z");
    assert_eq!(report.new_snapshot.timestamp, "2026-03-02T12:00:00Z");
}

#[test]
fn test_diff_orders_pair_chronologically() {
    let (_tmp, mut conn) = setup();
    let old_id = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    let new_id = ingest(&mut conn, http_and_https("2026-03-02T12:00:00Z"));

    // IDs swapped: the report orientation must not change
    let report = diff(&conn, new_id, old_id);

    assert_eq!(report.old_snapshot.timestamp, "2026-03-01T12:00:00Z");
    assert_eq!(report.ports_added.len(), 1);
    assert!(report.ports_removed.is_empty());
}

#[test]
fn test_diff_respects_timestamp_offsets() {
    let (_tmp, mut conn) = setup();
    // +02:00 noon is 10:00Z, so it is the earlier snapshot despite the
    // larger local-time string
    let early_id = ingest(&mut conn, http_only("2026-03-01T12:00:00+02:00"));
    let late_id = ingest(&mut conn, http_and_https("2026-03-01T11:00:00Z"));

    let report = diff(&conn, late_id, early_id);

    assert_eq!(report.old_snapshot.timestamp, "2026-03-01T12:00:00+02:00");
    assert_eq!(report.ports_added.len(), 1);
}

#[test]
fn test_diff_same_snapshot_has_no_changes() {
    let (_tmp, mut conn) = setup();
    let id = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));

    let report = diff(&conn, id, id);

    assert!(!report.has_changes);
}

#[test]
fn test_diff_is_read_only() {
    let (_tmp, mut conn) = setup();
    let old_id = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    let new_id = ingest(&mut conn, http_and_https("2026-03-02T12:00:00Z"));

    let before: i64 = conn
        .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))
        .unwrap();
    diff(&conn, old_id, new_id);
    let after: i64 = conn
        .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))
        .unwrap();

    assert_eq!(before, after, "ledger row count must be unchanged after diff");
}

#[test]
fn test_diff_missing_snapshot_is_not_found() {
    let (_tmp, mut conn) = setup();
    let id = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));

    let err = apply_engine_query(
        EngineQuery::SnapshotDiff {
            first_id: id,
            second_id: 9999,
        },
        &conn,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ScanErrorKind::NotFound);
    assert_eq!(err.snapshot_id(), Some(9999));
}

#[test]
fn test_diff_rejects_cross_host_pairs() {
    let (_tmp, mut conn) = setup();
    let a = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    let b = ingest(
        &mut conn,
        serde_json::json!({
            "ip": "10.0.0.1",
            "timestamp": "2026-03-02T12:00:00Z",
            "services": [{"port": 80, "protocol": "HTTP"}]
        }),
    );

    let err = apply_engine_query(
        EngineQuery::SnapshotDiff {
            first_id: a,
            second_id: b,
        },
        &conn,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ScanErrorKind::HostMismatch);
}

#[test]
fn test_diff_result_carries_human_summary() {
    let (_tmp, mut conn) = setup();
    let old_id = ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    let new_id = ingest(&mut conn, http_and_https("2026-03-02T12:00:00Z"));

    match apply_engine_query(
        EngineQuery::SnapshotDiff {
            first_id: old_id,
            second_id: new_id,
        },
        &conn,
    )
    .unwrap()
    {
        EngineQueryResult::SnapshotDiff(r) => {
            assert!(r.human_summary.contains("192.0.2.7"));
            assert!(r.human_summary.contains("443"));
        }
        other => panic!("expected SnapshotDiff result, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Lookup queries
// ---------------------------------------------------------------------------

#[test]
fn test_snapshot_get_returns_document_and_metadata() {
    let (_tmp, mut conn) = setup();
    let id = ingest(&mut conn, http_and_https("2026-03-01T12:00:00Z"));

    match apply_engine_query(EngineQuery::SnapshotGet { snapshot_id: id }, &conn).unwrap() {
        EngineQueryResult::SnapshotGet(r) => {
            assert_eq!(r.snapshot_id, id);
            assert_eq!(r.filename, "scan.json");
            assert_eq!(r.snapshot.services.len(), 2);
            assert_eq!(r.content_digest.len(), 64);
        }
        other => panic!("expected SnapshotGet result, got {:?}", other),
    }
}

#[test]
fn test_snapshot_list_newest_first() {
    let (_tmp, mut conn) = setup();
    ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    ingest(&mut conn, http_and_https("2026-03-02T12:00:00Z"));

    match apply_engine_query(
        EngineQuery::SnapshotList {
            host: "192.0.2.7".to_string(),
        },
        &conn,
    )
    .unwrap()
    {
        EngineQueryResult::SnapshotList(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].timestamp, "2026-03-02T12:00:00Z");
        }
        other => panic!("expected SnapshotList result, got {:?}", other),
    }
}

#[test]
fn test_host_list_distinct() {
    let (_tmp, mut conn) = setup();
    ingest(&mut conn, http_only("2026-03-01T12:00:00Z"));
    ingest(&mut conn, http_and_https("2026-03-02T12:00:00Z"));
    ingest(
        &mut conn,
        serde_json::json!({
            "ip": "10.0.0.1",
            "timestamp": "2026-03-01T12:00:00Z",
            "services": []
        }),
    );

    match apply_engine_query(EngineQuery::HostList, &conn).unwrap() {
        EngineQueryResult::HostList(hosts) => {
            assert_eq!(hosts, vec!["10.0.0.1", "192.0.2.7"]);
        }
        other => panic!("expected HostList result, got {:?}", other),
    }
}
