//! Snapshot model.

use crate::model::Service;
use serde::{Deserialize, Serialize};

/// A host's service inventory at one instant.
///
/// Immutable once created: the comparison engine only ever reads snapshots,
/// and the store persists them as opaque JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Host address (IPv4/IPv6 literal)
    pub ip: String,

    /// RFC3339 timestamp of the scan; the chronological ordering key
    pub timestamp: String,

    /// Ordered service inventory
    pub services: Vec<Service>,

    /// Declared service count; informational only, never validated against
    /// `services.len()` by the comparison engine
    #[serde(default)]
    pub service_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_round_trip() {
        let json = r#"{
            "ip": "192.168.1.10",
            "timestamp": "2026-03-01T12:00:00Z",
            "services": [{"port": 22, "protocol": "SSH"}],
            "service_count": 1
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.ip, "192.168.1.10");
        assert_eq!(snapshot.timestamp, "2026-03-01T12:00:00Z");
        assert_eq!(snapshot.services.len(), 1);
        assert_eq!(snapshot.service_count, 1);
    }

    #[test]
    fn test_snapshot_service_count_defaults() {
        let json = r#"{"ip": "10.0.0.1", "timestamp": "2026-03-01T12:00:00Z", "services": []}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.service_count, 0);
    }
}
