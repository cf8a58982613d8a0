//! Data-quality rules enforced at the ingest boundary.

pub mod validation;

pub use validation::{validate_snapshot, ValidationError};
