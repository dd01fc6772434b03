//! High-level client for the restaurants API.
//!
//! # Design
//! `RestaurantsClient` exposes one method per business operation. Every
//! method follows the same shape: build a `Request` variant, dispatch it
//! through the protocol client, unwrap the payload, and translate any
//! protocol error into the client error taxonomy. The shared `request`
//! helper, generic over the expected payload type, keeps the per-operation
//! methods down to the fields they set.
//!
//! The client is stateless: it holds only the protocol clients (endpoint +
//! transport), which are immutable for its lifetime and safe for concurrent
//! read-only use. Each call is an independent request/response cycle.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::auth::AuthenticationClient;
use crate::endpoints::Endpoints;
use crate::error::{Error, ERROR_INTERNAL, ERROR_INVALID_DATA, ERROR_NO_PERMISSION};
use crate::http::{HttpTransport, TransportConfig, UreqTransport};
use crate::protocol::{ProtocolClient, ProtocolError};
use crate::request::Request;
use crate::types::{
    Filter, Order, OrderConfirmation, OrderStatus, Ordering, OrdersResponse, RestaurantFullInfo,
    RestaurantIds, SearchResponse, SearchResult, ViewMode,
};

/// Synchronous client for the restaurants API.
#[derive(Debug, Clone)]
pub struct RestaurantsClient<T> {
    protocol: ProtocolClient<T>,
    authentication: AuthenticationClient<T>,
}

impl RestaurantsClient<UreqTransport> {
    /// Client against the production endpoints, with a ureq transport built
    /// from `config`.
    pub fn production(config: &TransportConfig) -> Self {
        Self::with_endpoints(config, Endpoints::production())
    }

    /// Client against a caller-supplied endpoint set.
    pub fn with_endpoints(config: &TransportConfig, endpoints: Endpoints) -> Self {
        Self::new(UreqTransport::new(config), endpoints)
    }
}

impl<T: HttpTransport> RestaurantsClient<T> {
    /// Client over an injected transport. Both sub-clients share it.
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        let transport = Arc::new(transport);
        Self {
            protocol: ProtocolClient::new(Arc::clone(&transport), &endpoints.api),
            authentication: AuthenticationClient::new(transport, &endpoints.authentication),
        }
    }

    /// The authentication sub-client, wired against the authentication
    /// endpoint with the same transport.
    pub fn authentication(&self) -> &AuthenticationClient<T> {
        &self.authentication
    }

    /// Retrieve restaurant metadata and its full menu.
    pub fn retrieve_restaurant_info(&self, restaurant_id: &str) -> Result<RestaurantFullInfo, Error> {
        self.request(&Request::GetOrganizationFull {
            organization_id: restaurant_id.to_string(),
        })
    }

    /// Submit an order. Returns the order as accepted by the service, with
    /// its assigned id, status, and owner token.
    pub fn submit_order(&self, access_token: Option<&str>, order: Order) -> Result<Order, Error> {
        let confirmation: OrderConfirmation = self.request(&Request::SubmitOrder {
            access_token: access_token.map(str::to_string),
            order,
        })?;
        Ok(confirmation.order)
    }

    /// Retrieve an order as its originating customer, authorized by the
    /// owner token alone.
    pub fn retrieve_order_as_owner(&self, order_id: &str, owner_token: &str) -> Result<Order, Error> {
        self.request(&Request::GetOrder {
            access_token: None,
            order_id: order_id.to_string(),
            owner_token: Some(owner_token.to_string()),
            view_mode: ViewMode::Customer,
        })
    }

    /// Retrieve an order as restaurant staff, authorized by the access token.
    pub fn retrieve_order_as_restaurant(
        &self,
        access_token: &str,
        order_id: &str,
    ) -> Result<Order, Error> {
        self.request(&Request::GetOrder {
            access_token: Some(access_token.to_string()),
            order_id: order_id.to_string(),
            owner_token: None,
            view_mode: ViewMode::Restaurant,
        })
    }

    /// Search for restaurants matching `filter`, up to `limit` results.
    pub fn search(&self, filter: Filter, limit: u32) -> Result<Vec<SearchResult>, Error> {
        let response: SearchResponse = self.request(&Request::Search { filter, limit })?;
        Ok(response.results)
    }

    /// All orders in status `new` for a single restaurant, oldest first.
    pub fn retrieve_new_orders(
        &self,
        access_token: &str,
        restaurant_id: &str,
    ) -> Result<Vec<Order>, Error> {
        let response: OrdersResponse = self.request(&Request::QueryOrders {
            access_token: access_token.to_string(),
            restaurant_ids: RestaurantIds::from([restaurant_id.to_string()]),
            view_mode: ViewMode::Restaurant,
            status: OrderStatus::New,
            ordering: Ordering::Asc,
            limit: u32::MAX,
        })?;
        Ok(response.results)
    }

    /// Accept an order, optionally recording its identifiers in external
    /// systems. Returns the updated order.
    pub fn accept_order(
        &self,
        access_token: &str,
        order_id: &str,
        external_ids: BTreeMap<String, String>,
    ) -> Result<Order, Error> {
        self.request(&Request::SetOrderStatus {
            access_token: access_token.to_string(),
            order_id: order_id.to_string(),
            status: OrderStatus::Accepted,
            external_ids,
            comment: None,
        })
    }

    /// Reject an order with an optional comment. Returns the updated order.
    pub fn reject_order(
        &self,
        access_token: &str,
        order_id: &str,
        comment: Option<&str>,
    ) -> Result<Order, Error> {
        self.request(&Request::SetOrderStatus {
            access_token: access_token.to_string(),
            order_id: order_id.to_string(),
            status: OrderStatus::Cancelled,
            external_ids: BTreeMap::new(),
            comment: comment.map(str::to_string),
        })
    }

    fn request<R: DeserializeOwned>(&self, request: &Request) -> Result<R, Error> {
        self.protocol.dispatch(request).map_err(translate)
    }
}

/// Map protocol-level failures into the client error taxonomy. Low-level I/O
/// failures become `Communication`; service error codes map through a fixed
/// table with `Service` as the fallback.
fn translate(err: ProtocolError) -> Error {
    match err {
        ProtocolError::Transport(e) => Error::Communication(e.to_string()),
        ProtocolError::Codec(message) => Error::Communication(message),
        ProtocolError::Service { code, message } => match code.as_str() {
            ERROR_NO_PERMISSION => Error::NoPermission(message),
            ERROR_INVALID_DATA => Error::InvalidData(message),
            ERROR_INTERNAL => Error::Internal(message),
            _ => Error::Service { code, message },
        },
    }
}
