//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.
//! Caller crates must depend on `scandiff-core-types` for the schema
//! constants the expansions reference.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use scandiff_core::log_op_start;
/// log_op_start!("ingest_snapshot");
/// log_op_start!("ingest_snapshot", host = "192.0.2.7");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = scandiff_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = scandiff_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use scandiff_core::log_op_end;
/// log_op_end!("ingest_snapshot", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = scandiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = scandiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error expression must be (convertible into) a
/// [`ScanError`](crate::errors::ScanError) so the stable code and kind can
/// be attached as structured fields.
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let scan_err: $crate::errors::ScanError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = scandiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.code = scan_err.code(),
            err.message = %scan_err,
        );
    }};
}
