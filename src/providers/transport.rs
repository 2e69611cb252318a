//! HTTP seam between adapters and the network.

use crate::errors::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// A provider call ready to send: always a JSON `POST`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Endpoint without query string
    pub url: String,
    /// Query parameters (used for key-in-query authentication)
    pub query: Vec<(String, String)>,
    /// Extra headers; `Content-Type: application/json` is implied
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Value,
}

impl HttpRequest {
    /// A request with no query parameters or headers yet
    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body,
        }
    }

    /// Adds a header
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Adds a query parameter
    #[must_use]
    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    /// Looks up a header by case-insensitive name
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body text
    pub body: String,
}

impl HttpResponse {
    /// 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends one request and returns whatever came back.
///
/// Implementations must not retry; a non-success status is a normal return.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport over `reqwest`. No timeout is configured.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport with a default client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport reusing an existing client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, "Sending provider request");

        let mut builder = self.client.post(&request.url).json(&request.body);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "Provider responded");

        Ok(HttpResponse { status, body })
    }
}
