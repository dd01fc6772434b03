use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, RESTAURANT_ID};
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn envelope_request(body: &Value) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Dispatch one envelope request against a running app service.
async fn call(app: &mut axum::routing::RouterIntoService<String>, body: Value) -> Value {
    let response = ServiceExt::ready(app)
        .await
        .unwrap()
        .call(envelope_request(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// --- get_organization_full ---

#[tokio::test]
async fn organization_full_returns_menu_in_value_slot() {
    let app = app();
    let resp = app
        .oneshot(envelope_request(&json!({
            "type": "get_organization_full",
            "organizationId": RESTAURANT_ID,
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = body_json(resp).await;
    assert!(envelope.get("error").is_none());
    assert_eq!(envelope["value"]["restaurant"]["id"], RESTAURANT_ID);
    assert!(!envelope["value"]["menu"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_organization_is_invalid_data() {
    let app = app();
    let resp = app
        .oneshot(envelope_request(&json!({
            "type": "get_organization_full",
            "organizationId": "nope",
        })))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["error"], "invalid-data");
    assert!(envelope.get("value").is_none());
}

// --- unknown request type ---

#[tokio::test]
async fn unrecognized_type_is_invalid_data() {
    let app = app();
    let resp = app
        .oneshot(envelope_request(&json!({ "type": "frobnicate" })))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["error"], "invalid-data");
}

// --- submit / retrieve / status lifecycle ---

#[tokio::test]
async fn order_lifecycle() {
    let mut app = app().into_service();

    // submit — server assigns id, status, owner token
    let envelope = call(
        &mut app,
        json!({
            "type": "submit_order",
            "order": {
                "restaurantId": RESTAURANT_ID,
                "orderItems": [{ "itemId": "carpaccio", "price": 12.0 }],
                "payments": [{ "type": "cash", "amount": 12.0 }],
            },
        }),
    )
    .await;
    let order = &envelope["value"]["order"];
    let order_id = order["id"].as_str().unwrap().to_string();
    let owner_token = order["ownerToken"].as_str().unwrap().to_string();
    assert_eq!(order["status"], "new");
    assert!(!order_id.is_empty());
    assert!(!owner_token.is_empty());

    // customer view with the right owner token
    let envelope = call(
        &mut app,
        json!({
            "type": "get_order",
            "orderId": order_id,
            "ownerToken": owner_token,
            "viewMode": "customer",
        }),
    )
    .await;
    assert_eq!(envelope["value"]["status"], "new");
    assert_eq!(envelope["value"]["orderItems"][0]["itemId"], "carpaccio");

    // customer view with the wrong owner token
    let envelope = call(
        &mut app,
        json!({
            "type": "get_order",
            "orderId": order_id,
            "ownerToken": "wrong",
            "viewMode": "customer",
        }),
    )
    .await;
    assert_eq!(envelope["error"], "no-permission");

    // restaurant view requires an access token and hides the owner token
    let envelope = call(
        &mut app,
        json!({
            "type": "get_order",
            "orderId": order_id,
            "viewMode": "restaurant",
        }),
    )
    .await;
    assert_eq!(envelope["error"], "no-permission");

    let envelope = call(
        &mut app,
        json!({
            "type": "get_order",
            "accessToken": "staff",
            "orderId": order_id,
            "viewMode": "restaurant",
        }),
    )
    .await;
    assert!(envelope["value"].get("ownerToken").is_none());

    // the new order shows up in a restaurant query
    let envelope = call(
        &mut app,
        json!({
            "type": "query_orders",
            "accessToken": "staff",
            "restaurantIds": [RESTAURANT_ID],
            "viewMode": "restaurant",
            "status": "new",
            "ordering": "asc",
            "limit": 100,
        }),
    )
    .await;
    assert_eq!(envelope["value"]["results"].as_array().unwrap().len(), 1);

    // accept with external ids
    let envelope = call(
        &mut app,
        json!({
            "type": "set_order_status",
            "accessToken": "staff",
            "orderId": order_id,
            "status": "accepted",
            "externalIds": { "pos": "1234" },
        }),
    )
    .await;
    assert_eq!(envelope["value"]["status"], "accepted");
    assert_eq!(envelope["value"]["externalIds"]["pos"], "1234");

    // accepted orders no longer match a status=new query
    let envelope = call(
        &mut app,
        json!({
            "type": "query_orders",
            "accessToken": "staff",
            "restaurantIds": [RESTAURANT_ID],
            "viewMode": "restaurant",
            "status": "new",
            "ordering": "asc",
            "limit": 100,
        }),
    )
    .await;
    assert!(envelope["value"]["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn rejecting_an_order_records_the_comment() {
    let mut app = app().into_service();

    let envelope = call(
        &mut app,
        json!({
            "type": "submit_order",
            "order": { "restaurantId": RESTAURANT_ID },
        }),
    )
    .await;
    let order_id = envelope["value"]["order"]["id"].as_str().unwrap().to_string();

    let envelope = call(
        &mut app,
        json!({
            "type": "set_order_status",
            "accessToken": "staff",
            "orderId": order_id,
            "status": "cancelled",
            "comment": "out of stock",
        }),
    )
    .await;
    assert_eq!(envelope["value"]["status"], "cancelled");
    assert_eq!(envelope["value"]["comment"], "out of stock");
}

#[tokio::test]
async fn unsupported_status_transition_is_invalid_data() {
    let mut app = app().into_service();

    let envelope = call(
        &mut app,
        json!({
            "type": "set_order_status",
            "accessToken": "staff",
            "orderId": "whatever",
            "status": "pending",
        }),
    )
    .await;
    assert_eq!(envelope["error"], "invalid-data");
}

#[tokio::test]
async fn search_honors_the_limit() {
    let mut app = app().into_service();

    let envelope = call(&mut app, json!({ "type": "search", "filter": {}, "limit": 1 })).await;
    assert_eq!(envelope["value"]["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn submit_without_order_is_invalid_data() {
    let app = app();
    let resp = app
        .oneshot(envelope_request(&json!({ "type": "submit_order" })))
        .await
        .unwrap();
    let envelope = body_json(resp).await;
    assert_eq!(envelope["error"], "invalid-data");
}
