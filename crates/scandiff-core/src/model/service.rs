//! Service-level model types.
//!
//! A `Service` is one network-facing endpoint on a host: a port, the
//! protocol spoken on it, and whatever the scanner learned about the
//! software, TLS configuration, and known vulnerabilities behind it.
//! Field optionality mirrors the ingest JSON contract: absent fields are
//! omitted on the wire and default on read.

use serde::{Deserialize, Serialize};

/// Software identification for a service (vendor/product/version triple).
///
/// All three fields are optional; a scanner that could not fingerprint the
/// service leaves the whole descriptor empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Software {
    /// True if no field of the descriptor is populated.
    pub fn is_empty(&self) -> bool {
        self.vendor.is_none() && self.product.is_none() && self.version.is_none()
    }
}

/// TLS configuration observed on a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_fingerprint_sha256: Option<String>,
}

/// One network service within a snapshot, keyed by port number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Port number; unique within a snapshot (the comparison join key)
    pub port: u16,

    /// Transport/application protocol label (compared case-sensitively)
    pub protocol: String,

    /// Status code; 0 means "unknown" and is omitted on the wire
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status: u16,

    /// Software descriptor; all-empty when the scanner saw nothing
    #[serde(default, skip_serializing_if = "Software::is_empty")]
    pub software: Software,

    /// TLS descriptor, absent for plaintext services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,

    /// Vulnerability identifiers (e.g. CVE IDs); order-insensitive
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<String>,
}

fn is_zero(n: &u16) -> bool {
    *n == 0
}
