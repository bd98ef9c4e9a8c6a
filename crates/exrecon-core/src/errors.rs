use exrecon_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::commit_gate::CommitPredicate;

/// Result type alias using ReconError
pub type Result<T> = std::result::Result<T, ReconError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests and responses surfaced to the editing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    NotFound,
    Deleted,
    AlreadyExists,

    // Session lifecycle
    CommitRefused,
    SessionClosed,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Deleted => "ERR_DELETED",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::CommitRefused => "ERR_COMMIT_REFUSED",
            ExErrorKind::SessionClosed => "ERR_SESSION_CLOSED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Crosses crate boundaries (store, engine) and carries classification
/// fields for programmatic handling plus context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

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
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add offending example ids (populated on CommitRefused)
    pub fn with_candidates(mut self, ids: Vec<String>) -> Self {
        self.candidates = Some(ids);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Offending example ids, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(ids) = &self.candidates {
            write!(f, " (examples: {})", ids.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for working-set operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconError {
    /// No example with this id in the working set
    #[error("Example not found in working set: {example_id}")]
    ExampleNotFound { example_id: String },

    /// Operation requires a non-deleted example
    #[error("Example is marked deleted: {example_id}")]
    ExampleDeleted { example_id: String },

    /// Inserted candidate reuses an id already in the working set
    #[error("Example already in working set: {example_id}")]
    DuplicateExample { example_id: String },

    /// Commit gate refused the working set; no store call was made
    #[error("Commit refused ({predicate}): {} offending example(s)", example_ids.len())]
    CommitRefused {
        predicate: CommitPredicate,
        example_ids: Vec<String>,
    },

    /// Session was already committed or discarded
    #[error("Editing session is closed: {session_id}")]
    SessionClosed { session_id: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Conversion from ReconError to ExError
impl From<ReconError> for ExError {
    fn from(err: ReconError) -> Self {
        match err {
            ReconError::ExampleNotFound { example_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(example_id)
                .with_message("Example not found in working set"),

            ReconError::ExampleDeleted { example_id } => ExError::new(ExErrorKind::Deleted)
                .with_entity_id(example_id)
                .with_message("Example is marked deleted"),

            ReconError::DuplicateExample { example_id } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_entity_id(example_id)
                    .with_message("Example already in working set")
            }

            ReconError::CommitRefused {
                predicate,
                example_ids,
            } => ExError::new(ExErrorKind::CommitRefused)
                .with_op("commit")
                .with_message(format!("Commit refused: {}", predicate))
                .with_candidates(example_ids),

            ReconError::SessionClosed { session_id } => ExError::new(ExErrorKind::SessionClosed)
                .with_entity_id(session_id)
                .with_message("Editing session is closed"),

            ReconError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }
        }
    }
}
