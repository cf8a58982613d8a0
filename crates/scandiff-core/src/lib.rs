//! scandiff Core - Snapshot model and comparison kernel
//!
//! This crate provides the foundational data structures and operations for
//! scandiff, including:
//! - Snapshot and Service models matching the ingest JSON contract
//! - Staged snapshot parsing (UTF-8 → JSON → typed) with content digests
//! - Ingest-side validation rules (host literal, timestamp, duplicate ports)
//! - The pure snapshot comparison engine and its structured report model
//! - Human-readable diff summaries for review output
//! - The canonical error facility and structured logging facility
//!
//! The comparison engine is a synchronous pure computation: it performs no
//! I/O, holds no state, and is safe to invoke concurrently for independent
//! snapshot pairs.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use diff::engine::compare_snapshots;
pub use diff::model::DiffReport;
pub use errors::{Result, ScanError, ScanErrorKind};
pub use model::{Service, Snapshot, Software, Tls};
