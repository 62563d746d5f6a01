//! Uniform request descriptor consumed by every transport variant

use serde_json::Value;

/// HTTP method for an [`ApiRequest`].
///
/// The remote API surface needs nothing beyond GET and POST, and a closed
/// enum keeps the descriptor independent of any particular HTTP library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Describes one outbound HTTP call: method, URL, headers, optional JSON
/// body. Built by the facade, consumed by a transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// Append one header pair.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_has_no_body() {
        let request = ApiRequest::get("http://localhost/offers");
        assert_eq!(request.method, Method::Get);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn post_carries_body_and_headers() {
        let request = ApiRequest::post("http://localhost/auth", json!({"k": "v"}))
            .header("accept", "application/json")
            .header("Bearer", "rt_1");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, Some(json!({"k": "v"})));
        assert_eq!(
            request.headers,
            vec![
                ("accept".to_string(), "application/json".to_string()),
                ("Bearer".to_string(), "rt_1".to_string()),
            ]
        );
    }
}
