//! Snapshot comparison engine.
//!
//! The core entry point is [`compare_snapshots`], which accepts two typed
//! snapshots of the same host and produces a [`DiffReport`].
//!
//! The comparison is a pure in-memory computation over already-validated
//! data: no I/O, no shared state, no error path. Callers are responsible for
//! resolving the two snapshots, checking that they belong to the same host,
//! and ordering them chronologically before invoking the engine.

use crate::diff::model::{ChangeType, DiffReport, PortChange, ServiceChange};
use crate::model::{Service, Snapshot, Software, Tls};
use std::collections::{BTreeMap, BTreeSet};

/// Build a port → service lookup in input order.
///
/// Last write wins on duplicate ports. Duplicates are a data-quality defect
/// the store rejects at ingest; the lookup still resolves them rather than
/// failing.
fn service_index(services: &[Service]) -> BTreeMap<u16, &Service> {
    let mut index = BTreeMap::new();
    for service in services {
        index.insert(service.port, service);
    }
    index
}

/// Compare two software triples field by field.
fn software_changed(old: &Software, new: &Software) -> bool {
    old.vendor != new.vendor || old.product != new.product || old.version != new.version
}

/// Compare two optional TLS descriptors.
///
/// Equal if both absent; unequal if exactly one is absent; otherwise equal
/// iff all three TLS fields match exactly.
fn tls_changed(old: Option<&Tls>, new: Option<&Tls>) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(a), Some(b)) => {
            a.version != b.version
                || a.cipher != b.cipher
                || a.cert_fingerprint_sha256 != b.cert_fingerprint_sha256
        }
    }
}

/// Compute a set-delta between two vulnerability lists.
///
/// Returns `(added, fixed)` where added = in new but not old, fixed = in old
/// but not new. Membership is exact string match; within each output list,
/// first-occurrence input order is preserved and duplicates are dropped.
fn vulnerability_delta(old: &[String], new: &[String]) -> (Vec<String>, Vec<String>) {
    let old_set: BTreeSet<&str> = old.iter().map(|s| s.as_str()).collect();
    let new_set: BTreeSet<&str> = new.iter().map(|s| s.as_str()).collect();

    let mut emitted: BTreeSet<&str> = BTreeSet::new();
    let added: Vec<String> = new
        .iter()
        .filter(|v| !old_set.contains(v.as_str()) && emitted.insert(v.as_str()))
        .cloned()
        .collect();

    emitted.clear();
    let fixed: Vec<String> = old
        .iter()
        .filter(|v| !new_set.contains(v.as_str()) && emitted.insert(v.as_str()))
        .cloned()
        .collect();

    (added, fixed)
}

/// Compare two services sharing a port, field by field.
///
/// Every category is evaluated (no short-circuiting) so the returned record
/// is complete. Returns `None` when nothing changed; the caller must not
/// append an empty record to the report.
pub fn compare_services(old: &Service, new: &Service) -> Option<ServiceChange> {
    let mut change = ServiceChange {
        port: old.port,
        protocol: old.protocol.clone(),
        ..Default::default()
    };

    let mut has_changes = false;

    if old.status != new.status {
        change.status_changed = true;
        change.old_status = Some(old.status);
        change.new_status = Some(new.status);
        has_changes = true;
    }

    if old.protocol != new.protocol {
        change.protocol_changed = true;
        change.old_protocol = Some(old.protocol.clone());
        change.new_protocol = Some(new.protocol.clone());
        has_changes = true;
    }

    if software_changed(&old.software, &new.software) {
        change.software_changed = true;
        change.old_software = Some(old.software.clone());
        change.new_software = Some(new.software.clone());
        has_changes = true;
    }

    if tls_changed(old.tls.as_ref(), new.tls.as_ref()) {
        change.tls_changed = true;
        change.old_tls = old.tls.clone();
        change.new_tls = new.tls.clone();
        has_changes = true;
    }

    let (added, fixed) = vulnerability_delta(&old.vulnerabilities, &new.vulnerabilities);
    if !added.is_empty() {
        change.vulnerabilities_added = added;
        has_changes = true;
    }
    if !fixed.is_empty() {
        change.vulnerabilities_fixed = fixed;
        has_changes = true;
    }

    if !has_changes {
        return None;
    }

    Some(change)
}

/// Compute a structured, deterministic diff between two snapshots.
///
/// `old` must be the chronologically earlier snapshot; ordering is the
/// caller's responsibility, as is checking that both snapshots describe the
/// same host. All three change sequences are ordered by port ascending, so
/// two runs over the same inputs serialize identically.
pub fn compare_snapshots(old: &Snapshot, new: &Snapshot) -> DiffReport {
    let old_services = service_index(&old.services);
    let new_services = service_index(&new.services);

    // Removed ports: in old, absent from new
    let mut ports_removed: Vec<PortChange> = Vec::new();
    for (port, service) in &old_services {
        if !new_services.contains_key(port) {
            ports_removed.push(PortChange {
                port: *port,
                change_type: ChangeType::Removed,
                old_service: Some((*service).clone()),
                new_service: None,
            });
        }
    }

    // Added ports and changed services
    let mut ports_added: Vec<PortChange> = Vec::new();
    let mut services_changed: Vec<ServiceChange> = Vec::new();
    for (port, new_service) in &new_services {
        match old_services.get(port) {
            None => ports_added.push(PortChange {
                port: *port,
                change_type: ChangeType::Added,
                old_service: None,
                new_service: Some((*new_service).clone()),
            }),
            Some(old_service) => {
                if let Some(change) = compare_services(old_service, new_service) {
                    services_changed.push(change);
                }
            }
        }
    }

    let has_changes =
        !ports_added.is_empty() || !ports_removed.is_empty() || !services_changed.is_empty();

    DiffReport {
        old_snapshot: old.clone(),
        new_snapshot: new.clone(),
        ports_added,
        ports_removed,
        services_changed,
        has_changes,
    }
}
