//! Snapshot diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Change sequences are kept sorted by port for deterministic serialization.

use crate::model::{Service, Snapshot, Software, Tls};
use serde::{Deserialize, Serialize};

/// Whether a port-change entry records an appearance or a disappearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Port present in `new` but not `old`
    Added,
    /// Port present in `old` but not `new`
    Removed,
}

/// A port that appeared in or disappeared from a host's inventory.
///
/// Carries the one-sided service payload: `old_service` for removals,
/// `new_service` for additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortChange {
    /// Port number
    pub port: u16,
    /// "added" or "removed"
    pub change_type: ChangeType,
    /// Service state in the old snapshot (removals only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_service: Option<Service>,
    /// Service state in the new snapshot (additions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_service: Option<Service>,
}

/// Field-level changes for a service present in both snapshots.
///
/// Only the categories that actually changed carry before/after values;
/// untouched optional fields stay absent in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceChange {
    /// Port number (the join key)
    pub port: u16,
    /// Protocol label of the old-side service
    pub protocol: String,

    /// True if the status code differs
    pub status_changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<u16>,

    /// True if the protocol label differs (case-sensitive)
    pub protocol_changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_protocol: Option<String>,

    /// True if the software triple differs
    pub software_changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_software: Option<Software>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_software: Option<Software>,

    /// True if the TLS descriptors differ (including one-sided absence)
    pub tls_changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_tls: Option<Tls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tls: Option<Tls>,

    /// Vulnerability IDs in `new` but not `old`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities_added: Vec<String>,
    /// Vulnerability IDs in `old` but not `new`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities_fixed: Vec<String>,
}

/// The structured result of comparing two snapshots of the same host.
///
/// Constructed fresh per comparison and never mutated after return. The
/// three change sequences are ordered by port ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// The chronologically earlier snapshot
    pub old_snapshot: Snapshot,
    /// The chronologically later snapshot
    pub new_snapshot: Snapshot,
    /// Ports present only in the new snapshot
    pub ports_added: Vec<PortChange>,
    /// Ports present only in the old snapshot
    pub ports_removed: Vec<PortChange>,
    /// Per-service field changes for ports present in both
    pub services_changed: Vec<ServiceChange>,
    /// True iff at least one of the three change sequences is non-empty
    pub has_changes: bool,
}
