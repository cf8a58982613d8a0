//! Snapshot ledger operations: persistence and read-only queries.

pub mod persist;
pub mod query;

pub use persist::{insert_snapshot, InsertResult};
pub use query::{fetch_snapshot_row, list_hosts, list_snapshot_rows_by_host, SnapshotRow};
