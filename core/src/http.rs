//! HTTP transport types and the injectable transport seam.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe HTTP exchanges as plain data, so
//! the protocol layer never touches a socket directly. All I/O goes through
//! the `HttpTransport` trait: production code injects `UreqTransport`, tests
//! inject fakes that return canned responses or simulated failures.
//!
//! All fields use owned types (`String`, `Vec`) so requests and responses can
//! be captured, inspected, or replayed without lifetime concerns.

use std::time::Duration;

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are ordinary responses, not transport errors; the
/// protocol layer decides what a status means.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A failure below the protocol level: connection refused, timeout, DNS,
/// malformed HTTP. Service-reported errors never take this form.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes HTTP requests. The single injection point for all network I/O.
///
/// Implementations own timeout and retry behavior; layers above this trait
/// perform no retries of their own.
pub trait HttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport configuration fixed at construction and passed through to the
/// transport unmodified.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Additional attempts after the first, on transport-level failure only.
    pub retries: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            retries: 0,
        }
    }
}

/// Synchronous `HttpTransport` over a ureq agent.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data, leaving status interpretation to the protocol layer.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    retries: u32,
}

impl UreqTransport {
    pub fn new(config: &TransportConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(config.connect_timeout))
            .timeout_recv_response(Some(config.read_timeout))
            .build()
            .new_agent();

        Self {
            agent,
            retries: config.retries,
        }
    }

    fn execute_once(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&request.url), request).call(),
            (HttpMethod::Delete, _) => {
                with_headers(self.agent.delete(&request.url), request).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&request.url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(self.agent.post(&request.url), request).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&request.url), request).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers(self.agent.put(&request.url), request).send_empty()
            }
        };

        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut last_error = TransportError("no attempt made".to_string());
        for _ in 0..=self.retries {
            match self.execute_once(request) {
                Ok(response) => return Ok(response),
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }
}
