use crate::response::ErrorDetail;
use thiserror::Error;

/// Main error type for Graph API operations
#[derive(Debug, Error)]
pub enum GraphError {
    /// Error envelope returned by the Graph API
    #[error("API error: {message} (code: {code})")]
    Api {
        message: String,
        kind: Option<String>,
        code: i64,
        subcode: Option<i64>,
        trace_id: Option<String>,
    },

    /// Failure status with a body that is not an error envelope
    #[error("API error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Response body could not be decoded into the expected shape
    #[error("unmarshaling response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request succeeded but the payload reports failure
    #[error("{0}")]
    OperationFailed(String),

    /// Failure attributed to a named client operation
    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<GraphError>,
    },

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// HTTP client error
    #[error("making request: {0}")]
    Transport(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Create a new API error from a decoded error envelope
    pub fn from_detail(detail: ErrorDetail) -> Self {
        GraphError::Api {
            message: detail.message,
            kind: detail.kind,
            code: detail.code,
            subcode: detail.error_subcode,
            trace_id: detail.fbtrace_id,
        }
    }

    /// Create a new HTTP error
    pub fn http(status: u16, body: String) -> Self {
        GraphError::Http { status, body }
    }

    /// Prefix this error with the operation that produced it
    pub fn context(self, operation: &'static str) -> Self {
        GraphError::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, with operation prefixes peeled off
    pub fn root(&self) -> &GraphError {
        let mut current = self;
        while let GraphError::Operation { source, .. } = current {
            current = source;
        }
        current
    }

    /// Remote error code, if this is (or wraps) an API error
    pub fn code(&self) -> Option<i64> {
        match self.root() {
            GraphError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// HTTP status of the failed response, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self.root() {
            GraphError::Http { status, .. } => Some(*status),
            GraphError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the remote side rejected the credential (OAuth error 190)
    pub fn is_invalid_token(&self) -> bool {
        self.code() == Some(190)
    }
}

/// Result type for Graph API operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Attach an operation prefix to the error side of a result
pub(crate) trait ResultExt<T> {
    fn context(self, operation: &'static str) -> Result<T>;
}

impl<T, E: Into<GraphError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| e.into().context(operation))
    }
}
