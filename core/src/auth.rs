//! Authentication sub-client.
//!
//! A peer client against the authentication endpoint, sharing the transport
//! injected into `RestaurantsClient`. The authentication protocol itself is
//! outside this crate's contract; the sub-client exists so callers obtain it
//! from `RestaurantsClient::authentication()` pre-wired with the same
//! transport and endpoint configuration.

use std::sync::Arc;

use crate::http::HttpTransport;
use crate::protocol::ProtocolClient;

/// Client for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthenticationClient<T> {
    protocol: ProtocolClient<T>,
}

impl<T: HttpTransport> AuthenticationClient<T> {
    pub(crate) fn new(transport: Arc<T>, endpoint: &str) -> Self {
        Self {
            protocol: ProtocolClient::new(transport, endpoint),
        }
    }

    /// The authentication endpoint this sub-client dispatches against.
    pub fn endpoint(&self) -> &str {
        self.protocol.endpoint()
    }
}
