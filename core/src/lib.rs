//! Synchronous client SDK for the restaurants ordering service.
//!
//! # Overview
//! Marshals typed requests (menu retrieval, order submission, order status
//! queries, search) into JSON-over-HTTP calls against a fixed base endpoint
//! and unmarshals the response envelopes into typed domain objects.
//!
//! # Design
//! - `RestaurantsClient` is stateless: one method per business operation,
//!   each an independent build → dispatch → unwrap → translate cycle.
//! - All I/O goes through the injected `HttpTransport`; timeouts and retry
//!   count are transport configuration, passed through unmodified.
//! - Service error codes map to a fixed error taxonomy so callers branch on
//!   kind, never on raw codes; transport failures stay a separate kind.
//! - DTOs are defined independently of the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod builders;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod protocol;
pub mod request;
pub mod types;

pub use auth::AuthenticationClient;
pub use client::RestaurantsClient;
pub use endpoints::Endpoints;
pub use error::Error;
pub use http::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportConfig, TransportError,
    UreqTransport,
};
pub use request::Request;
pub use types::{
    Contact, Dispatch, Filter, Menu, MenuItem, MenuSection, Order, OrderItem, OrderItemChoice,
    OrderStatus, Ordering, Payment, Restaurant, RestaurantFullInfo, SearchResult, Variation,
    ViewMode,
};
