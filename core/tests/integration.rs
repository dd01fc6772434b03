//! Full submit/retrieve/accept flow against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP through `UreqTransport`. Validates that request
//! building, envelope decoding, and error translation work end-to-end with
//! the actual server.

use std::collections::BTreeMap;
use std::time::Duration;

use restaurants_core::builders::{
    CashPaymentBuilder, ContactBuilder, OrderBuilder, OrderItemBuilder, PickupBuilder, total_price,
};
use restaurants_core::{
    Endpoints, Error, Filter, OrderStatus, RestaurantsClient, TransportConfig, UreqTransport,
};

/// Start the mock server on a random port and return a client against it.
fn start_client() -> RestaurantsClient<UreqTransport> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let endpoint = format!("http://{addr}");
    RestaurantsClient::with_endpoints(
        &TransportConfig {
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(5),
            retries: 1,
        },
        Endpoints::custom(&endpoint, &endpoint),
    )
}

#[test]
fn submit_and_retrieve_lifecycle() {
    let client = start_client();

    // Step 1: retrieve the menu.
    let full = client.retrieve_restaurant_info(mock_server::RESTAURANT_ID).unwrap();
    assert_eq!(full.restaurant.id, mock_server::RESTAURANT_ID);
    assert!(!full.menu.sections.is_empty());
    assert!(!full.menu.items.is_empty());

    // Step 2: build an order with two items and a cash payment covering them.
    let carpaccio = full.menu.item("carpaccio").unwrap();
    let coke = full.menu.item("coke").unwrap();
    let coke_small = full.menu.item("coke-small").unwrap();

    let items = [
        OrderItemBuilder::new(carpaccio).comment("Extra cheese please").build(),
        OrderItemBuilder::new(coke)
            .choice(0, OrderItemBuilder::new(coke_small).build())
            .build(),
    ];
    let amount = total_price(&items);
    assert_eq!(amount, 12.5);

    let mut builder = OrderBuilder::new()
        .developer("org.example")
        .restaurant(&full.restaurant.id)
        .locale("en_US")
        .currency(&full.restaurant.currency)
        .contact(ContactBuilder::new().first_name("John").last_name("Doe").build())
        .dispatch(PickupBuilder::new().for_asap().build())
        .comment("I'm allergic to nuts.")
        .payment(CashPaymentBuilder::new().amount(amount).build());
    for item in items.clone() {
        builder = builder.item(item);
    }
    let order = builder.build();

    // Step 3: submit — the service assigns id, status and owner token.
    let submitted = client.submit_order(None, order).unwrap();
    let order_id = submitted.id.clone().unwrap();
    let owner_token = submitted.owner_token.clone().unwrap();
    assert!(!order_id.is_empty());
    assert!(!owner_token.is_empty());
    assert_eq!(submitted.status, Some(OrderStatus::New));

    // Step 4: re-fetch as owner — same status, identical item list.
    let retrieved = client.retrieve_order_as_owner(&order_id, &owner_token).unwrap();
    assert_eq!(retrieved.status, Some(OrderStatus::New));
    assert_eq!(retrieved.order_items, items.to_vec());

    // Step 5: the wrong owner token is a permission error, not communication.
    let err = client.retrieve_order_as_owner(&order_id, "wrong-token").unwrap_err();
    assert!(matches!(err, Error::NoPermission(_)));

    // Step 6: the restaurant sees the order among its new orders, without
    // the owner token.
    let new_orders = client
        .retrieve_new_orders("staff-token", mock_server::RESTAURANT_ID)
        .unwrap();
    assert_eq!(new_orders.len(), 1);
    assert_eq!(new_orders[0].id.as_deref(), Some(order_id.as_str()));
    assert!(new_orders[0].owner_token.is_none());

    // Step 7: accept with an external id mapping.
    let accepted = client
        .accept_order(
            "staff-token",
            &order_id,
            BTreeMap::from([("pos".to_string(), "1234".to_string())]),
        )
        .unwrap();
    assert_eq!(accepted.status, Some(OrderStatus::Accepted));
    assert_eq!(accepted.external_ids.get("pos").map(String::as_str), Some("1234"));

    // Step 8: accepted orders drop out of the new-orders query.
    let new_orders = client
        .retrieve_new_orders("staff-token", mock_server::RESTAURANT_ID)
        .unwrap();
    assert!(new_orders.is_empty());
}

#[test]
fn reject_order_records_the_comment() {
    let client = start_client();

    let full = client.retrieve_restaurant_info(mock_server::RESTAURANT_ID).unwrap();
    let carpaccio = full.menu.item("carpaccio").unwrap();
    let order = OrderBuilder::new()
        .restaurant(&full.restaurant.id)
        .item(OrderItemBuilder::new(carpaccio).build())
        .build();

    let submitted = client.submit_order(None, order).unwrap();
    let order_id = submitted.id.unwrap();

    let rejected = client
        .reject_order("staff-token", &order_id, Some("out of stock"))
        .unwrap();
    assert_eq!(rejected.status, Some(OrderStatus::Cancelled));
    assert_eq!(rejected.comment.as_deref(), Some("out of stock"));

    // A restaurant staff member can still fetch the cancelled order.
    let fetched = client.retrieve_order_as_restaurant("staff-token", &order_id).unwrap();
    assert_eq!(fetched.status, Some(OrderStatus::Cancelled));
}

#[test]
fn search_returns_ranked_results() {
    let client = start_client();

    let results = client.search(Filter::default(), 10).unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().any(|r| r.id == mock_server::RESTAURANT_ID));

    let limited = client.search(Filter::default(), 1).unwrap();
    assert_eq!(limited.len(), 1);
}

#[test]
fn unknown_restaurant_is_invalid_data() {
    let client = start_client();

    let err = client.retrieve_restaurant_info("no-such-restaurant").unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn unreachable_service_is_a_communication_error() {
    // Nothing listens on this endpoint.
    let client = RestaurantsClient::with_endpoints(
        &TransportConfig {
            connect_timeout: Duration::from_millis(300),
            read_timeout: Duration::from_millis(300),
            retries: 0,
        },
        Endpoints::custom("http://127.0.0.1:9", "http://127.0.0.1:9"),
    );
    let err = client.retrieve_restaurant_info(mock_server::RESTAURANT_ID).unwrap_err();
    assert!(matches!(err, Error::Communication(_)));
}
