//! Thread-offloaded transport
//!
//! Runs the same synchronous call as [`crate::BlockingTransport`] on tokio's
//! blocking worker pool via `spawn_blocking`, so callers can await it without
//! stalling the async executor. Concurrency is bounded by the pool size.

use std::future::Future;
use std::pin::Pin;

use crate::blocking::execute_sync;
use crate::error::{Result, TransportError};
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::{Transport, TransportKind};

/// Transport that offloads blocking calls to the worker pool.
#[derive(Debug, Default)]
pub struct OffloadTransport;

impl OffloadTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for OffloadTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Offload
    }

    fn send<'a>(
        &'a self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>> {
        Box::pin(async move {
            tokio::task::spawn_blocking(move || execute_sync(&request))
                .await
                .map_err(|e| TransportError::Worker(format!("blocking worker failed: {e}")))?
        })
    }
}
