//! Error types for the client runtime.
//!
//! A single error enum is shared by the resource-identifier parser, the
//! dependency task group and the HTTP pipeline. The child-resource builder and
//! the pipeline policies introduce no error kinds of their own: they forward
//! whatever their collaborators return.

/// Main error type for client runtime operations.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A resource identifier string could not be parsed
    #[error("Invalid resource id '{id}': {reason}")]
    InvalidResourceId { id: String, reason: String },

    /// A dependency result was requested before the dependency ran
    #[error("No result available for task '{key}'")]
    MissingTaskResult { key: String },

    /// A dependency result exists but was stored under another type
    #[error("Result of task '{key}' has an unexpected type")]
    TaskResultTypeMismatch { key: String },

    /// A header name or value could not be represented on the wire
    #[error("Invalid header '{name}': '{value}'")]
    InvalidHeaderValue { name: String, value: String },

    /// Errors from the user-provided HTTP client
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RuntimeError {
    /// Create an invalid resource id error.
    pub fn invalid_resource_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResourceId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing task result error.
    pub fn missing_task_result(key: impl Into<String>) -> Self {
        Self::MissingTaskResult { key: key.into() }
    }

    /// Create an invalid header error.
    pub fn invalid_header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHeaderValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Wrap an error raised by an HTTP client implementation.
    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(error))
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type alias for client runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
