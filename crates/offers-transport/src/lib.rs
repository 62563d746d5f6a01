//! Pluggable HTTP transport layer for the Offers API client
//!
//! One capability (issue the request described by an [`ApiRequest`] and
//! normalize the outcome into an [`ApiResponse`]) with three interchangeable
//! implementations:
//!
//! 1. [`BlockingTransport`] performs the call synchronously, blocking the
//!    calling thread.
//! 2. [`OffloadTransport`] runs the same synchronous call on tokio's blocking
//!    worker pool so it can be awaited.
//! 3. [`AsyncTransport`] uses non-blocking I/O natively.
//!
//! Callers pick a variant through [`TransportKind`], usually recorded in the
//! persisted client configuration, and stay transport-agnostic: [`build`]
//! hands back an `Arc<dyn Transport>` and everything above it works with the
//! trait alone.

pub mod blocking;
pub mod error;
pub mod native;
pub mod offload;
pub mod request;
pub mod response;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use blocking::BlockingTransport;
pub use error::{Result, TransportError};
pub use native::AsyncTransport;
pub use offload::OffloadTransport;
pub use request::{ApiRequest, Method};
pub use response::ApiResponse;

/// Per-request timeout applied by every transport variant.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Discriminator for the transport variant, stored in the persisted client
/// configuration and resolved back to a concrete implementation by [`build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Synchronous call on the calling thread.
    Blocking,
    /// Synchronous call on the blocking worker pool, awaitable.
    Offload,
    /// Native non-blocking I/O.
    Async,
}

impl TransportKind {
    /// Variant label for logging and state files.
    pub fn label(&self) -> &'static str {
        match self {
            TransportKind::Blocking => "blocking",
            TransportKind::Offload => "offload",
            TransportKind::Async => "async",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Abstraction over outbound HTTP call strategies.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
/// (`Arc<dyn Transport>`).
pub trait Transport: Send + Sync {
    /// Variant identifier for logging and state persistence.
    fn kind(&self) -> TransportKind;

    /// Issue a single HTTP request and normalize the outcome.
    ///
    /// A non-2xx status is a normal [`ApiResponse`] for the caller to
    /// interpret; only network-level failures become [`TransportError`].
    fn send<'a>(
        &'a self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>>;
}

/// Construct the transport variant named by `kind`.
pub fn build(kind: TransportKind) -> Arc<dyn Transport> {
    match kind {
        TransportKind::Blocking => Arc::new(BlockingTransport::new()),
        TransportKind::Offload => Arc::new(OffloadTransport::new()),
        TransportKind::Async => Arc::new(AsyncTransport::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransportKind::Blocking).unwrap(),
            "\"blocking\""
        );
        assert_eq!(
            serde_json::to_string(&TransportKind::Offload).unwrap(),
            "\"offload\""
        );
        assert_eq!(
            serde_json::to_string(&TransportKind::Async).unwrap(),
            "\"async\""
        );
    }

    #[test]
    fn kind_roundtrips_through_serde() {
        for kind in [
            TransportKind::Blocking,
            TransportKind::Offload,
            TransportKind::Async,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            let back: TransportKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn label_matches_serde_discriminator() {
        for kind in [
            TransportKind::Blocking,
            TransportKind::Offload,
            TransportKind::Async,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.label()));
        }
    }

    #[test]
    fn build_returns_the_requested_variant() {
        for kind in [
            TransportKind::Blocking,
            TransportKind::Offload,
            TransportKind::Async,
        ] {
            assert_eq!(build(kind).kind(), kind);
        }
    }
}
