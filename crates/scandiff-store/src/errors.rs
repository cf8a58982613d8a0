//! Error handling for scandiff-store
//!
//! Wraps scandiff-core ScanError with store-specific helpers

use scandiff_core::errors::{ScanError, ScanErrorKind};

/// Result type alias using ScanError
pub type Result<T> = std::result::Result<T, ScanError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ScanError {
    ScanError::new(ScanErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ScanError {
    ScanError::new(ScanErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ScanError {
    ScanError::new(ScanErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ScanError {
    ScanError::new(ScanErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
