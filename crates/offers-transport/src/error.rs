//! Transport-level error types

/// Errors from issuing an HTTP request, independent of response status.
///
/// Non-2xx statuses are not transport errors; they come back as a normal
/// `ApiResponse` for the caller to interpret.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("worker failure: {0}")]
    Worker(String),
}

impl TransportError {
    /// Classify a reqwest error as timeout vs generic network failure.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
