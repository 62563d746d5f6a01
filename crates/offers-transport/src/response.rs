//! Normalized response triple returned by every transport variant

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// Status, headers, and raw body of one HTTP response.
///
/// Ephemeral: one per transport call, consumed by the facade and dropped.
/// The body stays a raw string here; interpreting it (and deciding whether a
/// given status is an error) belongs to the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Collect response headers into a plain map, skipping values that are not
/// valid UTF-8.
pub(crate) fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
