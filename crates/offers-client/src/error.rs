//! Error taxonomy for Offers API operations

use offers_transport::TransportError;

/// Errors surfaced by the client facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The refresh-token exchange was rejected, the access token was
    /// rejected, or the transport failed while authenticating. Fatal for
    /// the call that triggered it; the caller needs a new refresh token or
    /// a retry later.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Non-2xx response from a non-authentication endpoint. Carries the
    /// status and raw body for caller inspection.
    #[error("API rejected the request ({status}): {body}")]
    InvalidRequest { status: u16, body: String },

    /// Network or timeout failure outside the authentication path. Not
    /// retried here; retry policy belongs to the caller.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A success status whose body did not match the documented shape.
    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("client state parse error: {0}")]
    StateParse(String),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
