//! Snapshot comparison: engine, report model, and human-readable summaries.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compare_snapshots;
pub use human_summary::render_human_summary;
pub use model::{ChangeType, DiffReport, PortChange, ServiceChange};
