//! HTTP transport seam.
//!
//! The executor describes each call as a plain-data [`HttpRequest`] and hands
//! it to a [`Transport`], which performs exactly one round-trip and returns a
//! plain-data [`HttpResponse`]. [`ReqwestTransport`] is the network
//! implementation; tests substitute in-memory transports.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::Value;

use crate::client::ClientOptions;
use crate::error::ClientError;

/// HTTP method for a request. The API only uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Fetch-style call, no server-side effects.
    Get,
    /// Side-effecting call.
    Post,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query parameters, URL-encoded by the transport.
    pub query: Vec<(String, String)>,
    /// Header name/value pairs in send order.
    pub headers: Vec<(String, String)>,
    /// JSON body; `None` sends no body.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Value of the first header with this name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw response text.
    pub body: String,
}

/// Performs one HTTP round-trip.
///
/// Implementations must not retry. Network faults are returned as
/// [`ClientError::Http`].
pub trait Transport: Send + Sync {
    /// Send the request and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// Blocking `reqwest` transport with fixed connect and overall timeouts.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client from the options' timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn new(options: &ClientOptions) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }
}
