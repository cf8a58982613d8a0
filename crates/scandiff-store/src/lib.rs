//! scandiff Store - Persistence layer for the snapshot ledger
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - Snapshot ledger operations: transactional insert with content-digest
//!   idempotency, fetch by ID, list by host, distinct hosts
//! - Connection management helpers

pub mod db;
pub mod errors;
pub mod migrations;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
