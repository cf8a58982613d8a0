//! Snapshot validation rules.
//!
//! These rules run once, at ingest time. The comparison engine itself never
//! re-validates: it assumes well-formed snapshots and tolerates duplicate
//! ports via last-write-wins lookups, but the store refuses to persist them.

use crate::model::Snapshot;
use std::collections::BTreeSet;
use std::net::IpAddr;
use thiserror::Error;

/// A violated data-quality rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("host address is required")]
    MissingHost,

    #[error("host address is not an IPv4/IPv6 literal: {host}")]
    InvalidHost { host: String },

    #[error("timestamp is required")]
    MissingTimestamp,

    #[error("timestamp is not valid RFC3339: {timestamp}")]
    InvalidTimestamp { timestamp: String },

    #[error("service list declares port {port} more than once")]
    DuplicatePort { port: u16 },
}

/// Validate a parsed snapshot against the ingest rules.
///
/// Checks, in order: host present and parseable as an IP literal, timestamp
/// present and RFC3339-parseable, no duplicate port numbers.
///
/// # Errors
///
/// Returns the first violated rule as a [`ValidationError`].
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), ValidationError> {
    if snapshot.ip.is_empty() {
        return Err(ValidationError::MissingHost);
    }
    if snapshot.ip.parse::<IpAddr>().is_err() {
        return Err(ValidationError::InvalidHost {
            host: snapshot.ip.clone(),
        });
    }

    if snapshot.timestamp.is_empty() {
        return Err(ValidationError::MissingTimestamp);
    }
    if chrono::DateTime::parse_from_rfc3339(&snapshot.timestamp).is_err() {
        return Err(ValidationError::InvalidTimestamp {
            timestamp: snapshot.timestamp.clone(),
        });
    }

    let mut seen: BTreeSet<u16> = BTreeSet::new();
    for service in &snapshot.services {
        if !seen.insert(service.port) {
            return Err(ValidationError::DuplicatePort { port: service.port });
        }
    }

    Ok(())
}
