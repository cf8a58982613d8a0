//! Snapshot ingestion machinery: byte parsing and content digests.

pub mod digest;
pub mod parse;

pub use digest::{canonical_json, content_digest};
pub use parse::parse_snapshot_bytes;
