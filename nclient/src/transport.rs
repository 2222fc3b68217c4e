//! Backend transport trait and reqwest-based HTTP implementation.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use ncommon::{BoxFuture, HeaderMap};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let method = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        };

        f.write_str(method)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Overrides the transport's default per-request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange with the backend. Non-2xx statuses are returned, not raised.
pub trait BackendTransport: Send + Sync + std::fmt::Debug {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, ClientError>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    request_timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Applied to requests that do not carry their own timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl BackendTransport for ReqwestTransport {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, ClientError>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Delete => Method::DELETE,
            };

            let mut builder = self.client.request(method, self.endpoint(&request.path));
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            if let Some(timeout) = request.timeout.or(self.request_timeout) {
                builder = builder.timeout(timeout);
            }

            let response = builder.send().await.map_err(|err| {
                if err.is_timeout() {
                    ClientError::timeout()
                } else {
                    ClientError::transport(err.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| ClientError::transport(err.to_string()))?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let transport = ReqwestTransport::new(Client::new()).with_base_url("http://api.test/");
        assert_eq!(
            transport.endpoint("/api/v1/chat"),
            "http://api.test/api/v1/chat"
        );
        assert_eq!(transport.endpoint("health"), "http://api.test/health");
    }

    #[test]
    fn success_range_is_2xx_only() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
    }

    #[test]
    fn request_builders_set_method_headers_and_body() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization".to_string(), "Bearer t".to_string());

        let request = HttpRequest::post("/api/v1/chat")
            .with_headers(headers)
            .with_json(serde_json::json!({"query": "q"}));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.method.to_string(), "POST");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.body, Some(serde_json::json!({"query": "q"})));
    }
}
