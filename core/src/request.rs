//! Tagged wire requests, one variant per business operation.
//!
//! # Design
//! The service speaks a single-endpoint protocol: every operation is a JSON
//! object POSTed to the base URL, discriminated by a `type` tag. `Request`
//! values are write-once — built by a client method, serialized, discarded —
//! and never mutated after dispatch.

use serde::Serialize;

use crate::types::{Filter, Order, OrderStatus, Ordering, RestaurantIds, ViewMode};
use std::collections::BTreeMap;

/// A single business operation, in wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Retrieve full restaurant info including the menu.
    #[serde(rename_all = "camelCase")]
    GetOrganizationFull { organization_id: String },

    /// Submit a new order. The access token is optional: anonymous customers
    /// submit without one.
    #[serde(rename_all = "camelCase")]
    SubmitOrder {
        #[serde(skip_serializing_if = "Option::is_none")]
        access_token: Option<String>,
        order: Order,
    },

    /// Retrieve a single order. Exactly one credential is attached, matching
    /// the view mode: the owner token for `customer`, the access token for
    /// `restaurant`.
    #[serde(rename_all = "camelCase")]
    GetOrder {
        #[serde(skip_serializing_if = "Option::is_none")]
        access_token: Option<String>,
        order_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        owner_token: Option<String>,
        view_mode: ViewMode,
    },

    /// Search for restaurants.
    #[serde(rename_all = "camelCase")]
    Search { filter: Filter, limit: u32 },

    /// Query orders across a set of restaurants.
    #[serde(rename_all = "camelCase")]
    QueryOrders {
        access_token: String,
        restaurant_ids: RestaurantIds,
        view_mode: ViewMode,
        status: OrderStatus,
        ordering: Ordering,
        limit: u32,
    },

    /// Request an order status transition (accept or reject).
    #[serde(rename_all = "camelCase")]
    SetOrderStatus {
        access_token: String,
        order_id: String,
        status: OrderStatus,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        external_ids: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
}
