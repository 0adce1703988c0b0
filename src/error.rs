use thiserror::Error;

/// The remote rejection categories that are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The request was malformed (`BadRequestException`).
    BadRequest,
    /// The caller is not authorized (`ForbiddenException`).
    Forbidden,
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionKind::BadRequest => f.write_str("BadRequestException"),
            RejectionKind::Forbidden => f.write_str("ForbiddenException"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DataApiError {
    #[error("Unsupported argument type for parameter `{name}`: {type_name}")]
    UnsupportedArgumentType {
        name: String,
        type_name: &'static str,
    },

    #[error("Remote request rejected ({kind}): {message}")]
    RemoteRequestRejected { kind: RejectionKind, message: String },

    #[error("Remote service error (HTTP {status}): {message}")]
    RemoteError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl DataApiError {
    /// True for errors the remote service raised because the request itself is wrong.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, DataApiError::RemoteRequestRejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataApiError>;
