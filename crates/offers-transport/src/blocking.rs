//! Fully synchronous transport
//!
//! Performs the call with `reqwest::blocking` on the thread that issued it.
//! From async code the call is entered through `tokio::task::block_in_place`,
//! which stalls the current worker for the duration of the request and
//! therefore requires the multi-thread runtime.
//!
//! The synchronous executor lives here and is shared with
//! [`crate::OffloadTransport`], which runs it on the blocking pool instead.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::request::{ApiRequest, Method};
use crate::response::{ApiResponse, collect_headers};
use crate::{REQUEST_TIMEOUT, Transport, TransportKind};

/// Transport that blocks the calling thread for every request.
#[derive(Debug, Default)]
pub struct BlockingTransport;

impl BlockingTransport {
    pub fn new() -> Self {
        Self
    }
}

/// Perform `request` synchronously on the current thread.
///
/// The blocking client owns a private runtime thread and must not be driven
/// from an async context, so it is built and used entirely inside the
/// blocking execution scope of whichever transport calls this.
pub(crate) fn execute_sync(request: &ApiRequest) -> Result<ApiResponse> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(TransportError::from_reqwest)?;

    let mut builder = match request.method {
        Method::Get => client.get(&request.url),
        Method::Post => client.post(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    debug!(method = request.method.as_str(), url = %request.url, "issuing blocking request");

    let response = builder.send().map_err(TransportError::from_reqwest)?;
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    let body = response.text().map_err(TransportError::from_reqwest)?;

    Ok(ApiResponse {
        status,
        headers,
        body,
    })
}

impl Transport for BlockingTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Blocking
    }

    fn send<'a>(
        &'a self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>> {
        Box::pin(async move { tokio::task::block_in_place(|| execute_sync(&request)) })
    }
}
