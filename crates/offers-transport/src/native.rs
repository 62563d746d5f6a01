//! Natively asynchronous transport
//!
//! Non-blocking I/O on the calling task via `reqwest::Client`. The client is
//! built once and reused, so connections are pooled across requests.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::request::{ApiRequest, Method};
use crate::response::{ApiResponse, collect_headers};
use crate::{REQUEST_TIMEOUT, Transport, TransportKind};

/// Transport that performs non-blocking I/O natively.
#[derive(Debug, Default)]
pub struct AsyncTransport {
    client: reqwest::Client,
}

impl AsyncTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Transport for AsyncTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Async
    }

    fn send<'a>(
        &'a self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            }
            .timeout(REQUEST_TIMEOUT);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            debug!(method = request.method.as_str(), url = %request.url, "issuing async request");

            let response = builder.send().await.map_err(TransportError::from_reqwest)?;
            let status = response.status().as_u16();
            let headers = collect_headers(response.headers());
            let body = response.text().await.map_err(TransportError::from_reqwest)?;

            Ok(ApiResponse {
                status,
                headers,
                body,
            })
        })
    }
}
