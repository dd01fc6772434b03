//! Demonstrates the "submit order" flow:
//! 1) retrieve the restaurant's menu,
//! 2) build an order with one plain item and one item with a variation choice,
//! 3) submit the order,
//! 4) re-fetch the submitted order as its owner.
//!
//! Runs against production by default; set `RESTAURANTS_API` and
//! `RESTAURANTS_AUTH` to target another deployment (e.g. a local mock
//! server). Any failure terminates the run, printing the error.

use restaurants_core::builders::{
    CashPaymentBuilder, ContactBuilder, OrderBuilder, OrderItemBuilder, PickupBuilder, total_price,
};
use restaurants_core::{
    Endpoints, MenuItem, Order, RestaurantFullInfo, RestaurantsClient, TransportConfig,
};

const RESTAURANT_ID: &str = "the-testaurant";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoints = match (std::env::var("RESTAURANTS_API"), std::env::var("RESTAURANTS_AUTH")) {
        (Ok(api), Ok(auth)) => Endpoints::custom(&api, &auth),
        _ => Endpoints::production(),
    };
    let client = RestaurantsClient::with_endpoints(&TransportConfig::default(), endpoints);

    print!("Retrieving menu...");
    let full = client.retrieve_restaurant_info(RESTAURANT_ID)?;
    println!(
        " done (sections: {}, items: {}).",
        full.menu.sections.len(),
        full.menu.items.len()
    );

    let order = build_some_order(&full)?;

    print!("Submitting order...");
    let submitted = client.submit_order(None, order)?;
    let order_id = submitted.id.clone().ok_or("submitted order has no id")?;
    let owner_token = submitted.owner_token.clone().ok_or("submitted order has no owner token")?;
    println!(" done (order ID: {order_id}, status: {:?}, ownerToken: {owner_token}).", submitted.status);

    print!("Retrieving order...");
    let retrieved = client.retrieve_order_as_owner(&order_id, &owner_token)?;
    println!(" done (status: {:?}).", retrieved.status);

    Ok(())
}

/// Pick a plain item and an item with variations off the menu and assemble an
/// order for them. In a real integration the customer makes these choices in
/// the UI.
fn build_some_order(full: &RestaurantFullInfo) -> Result<Order, Box<dyn std::error::Error>> {
    let plain = full
        .menu
        .items
        .iter()
        .find(|item| item.variations.is_empty())
        .ok_or("menu has no plain item")?;
    let plain_order_item = OrderItemBuilder::new(plain).comment("Extra cheese please").build();

    let with_variation = full
        .menu
        .items
        .iter()
        .find(|item| !item.variations.is_empty())
        .ok_or("menu has no item with variations")?;
    let option: &MenuItem = with_variation.variations[0]
        .item_ids
        .first()
        .and_then(|id| full.menu.item(id))
        .ok_or("variation has no options on the menu")?;
    let varied_order_item = OrderItemBuilder::new(with_variation)
        .choice(0, OrderItemBuilder::new(option).build())
        .build();

    let items = [plain_order_item, varied_order_item];
    let amount = total_price(&items);

    let mut builder = OrderBuilder::new()
        .developer("org.example")
        .restaurant(&full.restaurant.id)
        .locale("en_US")
        .currency(&full.restaurant.currency)
        .contact(
            ContactBuilder::new()
                .first_name("John")
                .last_name("Doe")
                .phone("+12024561111")
                .email("johndoe@example.org")
                .build(),
        )
        .dispatch(PickupBuilder::new().for_asap().build())
        .comment("I'm allergic to nuts.")
        .payment(CashPaymentBuilder::new().amount(amount).build());
    for item in items {
        builder = builder.item(item);
    }
    Ok(builder.build())
}
