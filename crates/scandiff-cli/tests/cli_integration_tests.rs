//! CLI integration tests
//!
//! These tests verify that the CLI commands correctly delegate to the
//! engine layer against a real ledger.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, document: serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, document.to_string()).unwrap();
    path
}

fn db_arg(dir: &TempDir) -> String {
    dir.path().join("store.db").to_str().unwrap().to_string()
}

fn ingest(dir: &TempDir, file: &PathBuf) {
    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["ingest", file.to_str().unwrap(), "--db", &db_arg(dir)])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "ingest should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_cli_ingest_then_diff() {
    let temp_dir = TempDir::new().unwrap();
    let old = write_fixture(
        &temp_dir,
        "old.json",
        serde_json::json!({
            "ip": "192.0.2.7",
            "timestamp": "2026-03-01T12:00:00Z",
            "services": [{"port": 80, "protocol": "HTTP"}],
            "service_count": 1
        }),
    );
    let new = write_fixture(
        &temp_dir,
        "new.json",
        serde_json::json!({
            "ip": "192.0.2.7",
            "timestamp": "2026-03-02T12:00:00Z",
            "services": [
                {"port": 80, "protocol": "HTTP"},
                {"port": 443, "protocol": "HTTPS"}
            ],
            "service_count": 2
        }),
    );

    ingest(&temp_dir, &old);
    ingest(&temp_dir, &new);

    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["diff", "1", "2", "--db", &db_arg(&temp_dir)])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "diff should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("diff output should be JSON");
    assert_eq!(report["has_changes"], true);
    assert_eq!(report["ports_added"][0]["port"], 443);
    assert_eq!(report["ports_added"][0]["change_type"], "added");
    assert_eq!(report["ports_removed"].as_array().unwrap().len(), 0);
}

#[test]
fn test_cli_diff_summary_flag() {
    let temp_dir = TempDir::new().unwrap();
    let old = write_fixture(
        &temp_dir,
        "old.json",
        serde_json::json!({
            "ip": "192.0.2.7",
            "timestamp": "2026-03-01T12:00:00Z",
            "services": [{"port": 22, "protocol": "SSH"}]
        }),
    );
    let new = write_fixture(
        &temp_dir,
        "new.json",
        serde_json::json!({
            "ip": "192.0.2.7",
            "timestamp": "2026-03-02T12:00:00Z",
            "services": []
        }),
    );

    ingest(&temp_dir, &old);
    ingest(&temp_dir, &new);

    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["diff", "1", "2", "--summary", "--db", &db_arg(&temp_dir)])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ports Removed"));
    assert!(stdout.contains("`22/SSH`"));
}

#[test]
fn test_cli_hosts_and_snapshot_list() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = write_fixture(
        &temp_dir,
        "scan.json",
        serde_json::json!({
            "ip": "10.0.0.1",
            "timestamp": "2026-03-01T12:00:00Z",
            "services": [{"port": 25, "protocol": "SMTP"}]
        }),
    );
    ingest(&temp_dir, &fixture);

    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["hosts", "--db", &db_arg(&temp_dir)])
        .output()
        .expect("Failed to execute CLI");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("10.0.0.1"));

    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["snapshot", "list", "10.0.0.1", "--db", &db_arg(&temp_dir)])
        .output()
        .expect("Failed to execute CLI");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2026-03-01T12:00:00Z"));
    assert!(stdout.contains("scan.json"));
}

#[test]
fn test_cli_ingest_rejects_non_json_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scan.xml");
    fs::write(&path, "<scan/>").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["ingest", path.to_str().unwrap(), "--db", &db_arg(&temp_dir)])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("JSON"));
}

#[test]
fn test_cli_diff_conflicting_hosts_fails() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_fixture(
        &temp_dir,
        "a.json",
        serde_json::json!({
            "ip": "192.0.2.7",
            "timestamp": "2026-03-01T12:00:00Z",
            "services": []
        }),
    );
    let b = write_fixture(
        &temp_dir,
        "b.json",
        serde_json::json!({
            "ip": "10.0.0.1",
            "timestamp": "2026-03-02T12:00:00Z",
            "services": []
        }),
    );
    ingest(&temp_dir, &a);
    ingest(&temp_dir, &b);

    let output = Command::new(env!("CARGO_BIN_EXE_scandiff-cli"))
        .args(["diff", "1", "2", "--db", &db_arg(&temp_dir)])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_HOST_MISMATCH"));
}
