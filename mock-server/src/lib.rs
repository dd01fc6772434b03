//! In-memory emulation of the restaurants service, for tests and local runs.
//!
//! Speaks the single-endpoint envelope protocol: every operation is a JSON
//! object POSTed to `/`, discriminated by its `type` tag, answered with a
//! `{"value": ...}` or `{"error": ..., "errorMessage": ...}` envelope (always
//! HTTP 200, like the real service). Orders are kept as raw JSON in
//! submission order so the server stays tolerant of client schema evolution;
//! ids and owner tokens are generated here.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// The one restaurant this server knows about.
pub const RESTAURANT_ID: &str = "the-testaurant";

/// Submitted orders, in submission order.
pub type Db = Arc<RwLock<Vec<Value>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new().route("/", post(handle)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn handle(State(db): State<Db>, Json(request): Json<Value>) -> Json<Value> {
    match request["type"].as_str() {
        Some("get_organization_full") => get_organization_full(&request),
        Some("submit_order") => submit_order(&db, &request).await,
        Some("get_order") => get_order(&db, &request).await,
        Some("search") => search(&request),
        Some("query_orders") => query_orders(&db, &request).await,
        Some("set_order_status") => set_order_status(&db, &request).await,
        _ => error("invalid-data", "unrecognized request type"),
    }
}

fn ok(value: Value) -> Json<Value> {
    Json(json!({ "value": value }))
}

fn error(code: &str, message: &str) -> Json<Value> {
    Json(json!({ "error": code, "errorMessage": message }))
}

fn has_access_token(request: &Value) -> bool {
    request["accessToken"].as_str().is_some_and(|t| !t.is_empty())
}

/// Customer views never expose external system ids.
fn customer_view(mut order: Value) -> Value {
    if let Some(fields) = order.as_object_mut() {
        fields.remove("externalIds");
    }
    order
}

/// Restaurant views never expose the owner token.
fn restaurant_view(mut order: Value) -> Value {
    if let Some(fields) = order.as_object_mut() {
        fields.remove("ownerToken");
    }
    order
}

fn get_organization_full(request: &Value) -> Json<Value> {
    if request["organizationId"] != RESTAURANT_ID {
        return error("invalid-data", "unknown organization");
    }
    ok(json!({
        "restaurant": {
            "id": RESTAURANT_ID,
            "title": "The Testaurant",
            "currency": "USD",
            "locale": "en_US"
        },
        "menu": {
            "sections": [
                { "id": "starters", "title": "Starters", "itemIds": ["carpaccio"] },
                { "id": "drinks", "title": "Drinks", "itemIds": ["coke"] }
            ],
            "items": [
                { "id": "carpaccio", "title": "Beef Carpaccio", "price": 12.0 },
                {
                    "id": "coke",
                    "title": "Coca-Cola",
                    "price": 0.0,
                    "variations": [
                        { "title": "Size", "itemIds": ["coke-small", "coke-large"] }
                    ]
                },
                { "id": "coke-small", "title": "Small", "price": 0.5 },
                { "id": "coke-large", "title": "Large", "price": 1.0 }
            ]
        }
    }))
}

async fn submit_order(db: &Db, request: &Value) -> Json<Value> {
    let Some(order) = request.get("order").filter(|o| o.is_object()) else {
        return error("invalid-data", "order is required");
    };
    let mut order = order.clone();
    if order["restaurantId"].as_str().is_none() {
        return error("invalid-data", "order has no restaurantId");
    }

    order["id"] = json!(Uuid::new_v4().to_string());
    order["status"] = json!("new");
    order["ownerToken"] = json!(Uuid::new_v4().to_string());

    db.write().await.push(order.clone());
    ok(json!({ "order": order }))
}

async fn get_order(db: &Db, request: &Value) -> Json<Value> {
    let orders = db.read().await;
    let Some(order) = orders.iter().find(|o| o["id"] == request["orderId"]) else {
        return error("invalid-data", "unknown order");
    };

    match request["viewMode"].as_str() {
        Some("customer") => {
            if order["ownerToken"].is_string() && request["ownerToken"] == order["ownerToken"] {
                ok(customer_view(order.clone()))
            } else {
                error("no-permission", "owner token does not match")
            }
        }
        Some("restaurant") => {
            if has_access_token(request) {
                ok(restaurant_view(order.clone()))
            } else {
                error("no-permission", "access token required")
            }
        }
        _ => error("invalid-data", "unknown view mode"),
    }
}

fn search(request: &Value) -> Json<Value> {
    let limit = request["limit"].as_u64().unwrap_or(u64::MAX) as usize;
    let results = [
        json!({ "id": RESTAURANT_ID, "title": "The Testaurant", "currency": "USD" }),
        json!({ "id": "pizza-palace", "title": "Pizza Palace", "currency": "USD" }),
    ];
    ok(json!({ "results": results.into_iter().take(limit).collect::<Vec<_>>() }))
}

async fn query_orders(db: &Db, request: &Value) -> Json<Value> {
    if !has_access_token(request) {
        return error("no-permission", "access token required");
    }
    let empty = Vec::new();
    let restaurant_ids: Vec<&str> = request["restaurantIds"]
        .as_array()
        .unwrap_or(&empty)
        .iter()
        .filter_map(Value::as_str)
        .collect();
    let status = &request["status"];
    let limit = request["limit"].as_u64().unwrap_or(u64::MAX) as usize;

    let orders = db.read().await;
    let mut results: Vec<Value> = orders
        .iter()
        .filter(|o| restaurant_ids.contains(&o["restaurantId"].as_str().unwrap_or_default()))
        .filter(|o| &o["status"] == status)
        .cloned()
        .map(restaurant_view)
        .collect();
    if request["ordering"] == "desc" {
        results.reverse();
    }
    results.truncate(limit);
    ok(json!({ "results": results }))
}

async fn set_order_status(db: &Db, request: &Value) -> Json<Value> {
    if !has_access_token(request) {
        return error("no-permission", "access token required");
    }
    let status = request["status"].as_str().unwrap_or_default();
    if status != "accepted" && status != "cancelled" {
        return error("invalid-data", "unsupported status transition");
    }

    let mut orders = db.write().await;
    let Some(order) = orders.iter_mut().find(|o| o["id"] == request["orderId"]) else {
        return error("invalid-data", "unknown order");
    };

    order["status"] = json!(status);
    if request["externalIds"].is_object() {
        order["externalIds"] = request["externalIds"].clone();
    }
    if request["comment"].is_string() {
        order["comment"] = request["comment"].clone();
    }
    ok(restaurant_view(order.clone()))
}
