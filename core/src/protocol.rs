//! Low-level protocol client: one request in, one envelope out.
//!
//! # Design
//! Every operation is a JSON POST against a fixed base endpoint. The response
//! is an envelope carrying either a typed payload or an error descriptor,
//! never both; if the service sets both, the error wins. `ProtocolClient`
//! holds only the endpoint and the injected transport — no caching, no
//! retries of its own, no state between calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, HttpTransport, TransportError};
use crate::request::Request;

/// Top-level response envelope: a success-payload slot and an error slot,
/// mutually exclusive.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseEnvelope<T> {
    value: Option<T>,
    error: Option<String>,
    error_message: Option<String>,
}

/// Errors raised by `ProtocolClient::dispatch`.
///
/// `Transport` and `Codec` are low-level I/O failures; `Service` carries a
/// service-reported error code and message verbatim. The distinction matters:
/// the layer above maps the two groups to different error kinds.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The request could not be encoded or the response body was not a valid
    /// envelope.
    #[error("codec failure: {0}")]
    Codec(String),

    #[error("service error {code}: {message}")]
    Service { code: String, message: String },
}

/// Issues single requests against a fixed base endpoint and decodes the
/// response envelope.
#[derive(Debug, Clone)]
pub struct ProtocolClient<T> {
    transport: Arc<T>,
    endpoint: String,
}

impl<T: HttpTransport> ProtocolClient<T> {
    pub fn new(transport: Arc<T>, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        self.transport.as_ref()
    }

    /// Serialize `request`, POST it to the endpoint, and unwrap the envelope
    /// into the expected payload type.
    pub fn dispatch<R: DeserializeOwned>(&self, request: &Request) -> Result<R, ProtocolError> {
        let body = serde_json::to_string(request)
            .map_err(|e| ProtocolError::Codec(format!("request encoding failed: {e}")))?;

        let http_request = HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint.clone(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        };

        let response = self.transport.execute(&http_request)?;

        let envelope: ResponseEnvelope<R> = serde_json::from_str(&response.body).map_err(|e| {
            ProtocolError::Codec(format!("HTTP {}: undecodable envelope: {e}", response.status))
        })?;

        match (envelope.value, envelope.error) {
            (_, Some(code)) => Err(ProtocolError::Service {
                code,
                message: envelope.error_message.unwrap_or_default(),
            }),
            (Some(value), None) => Ok(value),
            (None, None) => Err(ProtocolError::Codec(
                "envelope carries neither value nor error".to_string(),
            )),
        }
    }
}
