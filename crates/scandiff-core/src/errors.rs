use scandiff_core_types::{RequestId, TraceId};

/// Result type alias using ScanError
pub type Result<T> = std::result::Result<T, ScanError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the scandiff system. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and external responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    // Structural/Validation
    InvalidInput,
    /// Snapshot bytes are not valid UTF-8 JSON, or fail typed deserialization
    InvalidSnapshot,
    /// A required snapshot field (e.g. `ip`, `timestamp`, `services`) is absent
    MissingField,
    /// The host address is not an IPv4/IPv6 literal
    InvalidHost,
    /// The snapshot timestamp is not a valid RFC3339 string
    InvalidTimestamp,
    /// A snapshot's service list declares the same port more than once
    DuplicatePort,
    NotFound,
    /// A different snapshot already exists for this `(host, timestamp)` key
    AlreadyExists,
    /// The two snapshots of a diff request belong to different hosts
    HostMismatch,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ScanErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ScanErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ScanErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ScanErrorKind::MissingField => "ERR_MISSING_FIELD",
            ScanErrorKind::InvalidHost => "ERR_INVALID_HOST",
            ScanErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ScanErrorKind::DuplicatePort => "ERR_DUPLICATE_PORT",
            ScanErrorKind::NotFound => "ERR_NOT_FOUND",
            ScanErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ScanErrorKind::HostMismatch => "ERR_HOST_MISMATCH",
            ScanErrorKind::Io => "ERR_IO",
            ScanErrorKind::Serialization => "ERR_SERIALIZATION",
            ScanErrorKind::Persistence => "ERR_PERSISTENCE",
            ScanErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Provides a structured representation of errors with classification fields
/// for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ScanError {
    kind: ScanErrorKind,
    op: Option<String>,
    host: Option<String>,
    snapshot_id: Option<i64>,
    port: Option<u16>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ScanError>>,
}

impl ScanError {
    /// Create a new error with the specified kind
    pub fn new(kind: ScanErrorKind) -> Self {
        Self {
            kind,
            op: None,
            host: None,
            snapshot_id: None,
            port: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add host address context
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Add snapshot ID context
    pub fn with_snapshot_id(mut self, id: i64) -> Self {
        self.snapshot_id = Some(id);
        self
    }

    /// Add port context
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ScanError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ScanErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the host address context, if any
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Get the snapshot ID context, if any
    pub fn snapshot_id(&self) -> Option<i64> {
        self.snapshot_id
    }

    /// Get the port context, if any
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ScanError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(host) = &self.host {
            write!(f, " (host: {})", host)?;
        }
        if let Some(snapshot_id) = self.snapshot_id {
            write!(f, " (snapshot_id: {})", snapshot_id)?;
        }
        if let Some(port) = self.port {
            write!(f, " (port: {})", port)?;
        }
        Ok(())
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<crate::rules::validation::ValidationError> for ScanError {
    fn from(err: crate::rules::validation::ValidationError) -> Self {
        use crate::rules::validation::ValidationError;
        let kind = match &err {
            ValidationError::MissingHost => ScanErrorKind::MissingField,
            ValidationError::InvalidHost { .. } => ScanErrorKind::InvalidHost,
            ValidationError::MissingTimestamp => ScanErrorKind::MissingField,
            ValidationError::InvalidTimestamp { .. } => ScanErrorKind::InvalidTimestamp,
            ValidationError::DuplicatePort { .. } => ScanErrorKind::DuplicatePort,
        };
        let base = ScanError::new(kind)
            .with_op("validate_snapshot")
            .with_message(err.to_string());
        match err {
            ValidationError::DuplicatePort { port } => base.with_port(port),
            _ => base,
        }
    }
}
