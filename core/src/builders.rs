//! Fluent assemblers for orders and their parts.
//!
//! # Design
//! Plain consuming builders, one per concrete kind — no trait hierarchy.
//! They assemble value objects only; the service performs all validation.
//! `total_price` is the one computation: summing line items, recursing
//! through variation choices.

use crate::types::{
    Address, Contact, Dispatch, MenuItem, Order, OrderItem, OrderItemChoice, Payment,
};

/// Sum of the given line items' prices, including nested variation choices.
pub fn total_price(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| {
            item.price + total_price_of_choices(&item.choices)
        })
        .sum()
}

fn total_price_of_choices(choices: &[OrderItemChoice]) -> f64 {
    choices
        .iter()
        .map(|choice| choice.item.price + total_price_of_choices(&choice.item.choices))
        .sum()
}

/// Assembles an `Order`. `build` stamps the summed item price on the order.
#[derive(Debug, Default)]
pub struct OrderBuilder {
    order: Order,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn developer(mut self, developer: &str) -> Self {
        self.order.developer = Some(developer.to_string());
        self
    }

    pub fn restaurant(mut self, restaurant_id: &str) -> Self {
        self.order.restaurant_id = Some(restaurant_id.to_string());
        self
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.order.locale = Some(locale.to_string());
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.order.currency = Some(currency.to_string());
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.order.contact = Some(contact);
        self
    }

    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.order.dispatch = Some(dispatch);
        self
    }

    pub fn item(mut self, item: OrderItem) -> Self {
        self.order.order_items.push(item);
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.order.comment = Some(comment.to_string());
        self
    }

    pub fn payment(mut self, payment: Payment) -> Self {
        self.order.payments.push(payment);
        self
    }

    pub fn external_id(mut self, system: &str, id: &str) -> Self {
        self.order.external_ids.insert(system.to_string(), id.to_string());
        self
    }

    pub fn build(mut self) -> Order {
        self.order.price = Some(total_price(&self.order.order_items));
        self.order
    }
}

/// Assembles an `OrderItem` from a menu item, carrying its id and price.
#[derive(Debug)]
pub struct OrderItemBuilder {
    item: OrderItem,
}

impl OrderItemBuilder {
    pub fn new(menu_item: &MenuItem) -> Self {
        Self {
            item: OrderItem {
                item_id: menu_item.id.clone(),
                price: menu_item.price,
                comment: None,
                choices: Vec::new(),
            },
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.item.comment = Some(comment.to_string());
        self
    }

    /// Record a chosen option for the menu item's `variation`-th variation.
    pub fn choice(mut self, variation: usize, item: OrderItem) -> Self {
        self.item.choices.push(OrderItemChoice { variation, item });
        self
    }

    pub fn build(self) -> OrderItem {
        self.item
    }
}

/// Assembles customer contact details.
#[derive(Debug, Default)]
pub struct ContactBuilder {
    contact: Contact,
}

impl ContactBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, first_name: &str) -> Self {
        self.contact.first_name = Some(first_name.to_string());
        self
    }

    pub fn last_name(mut self, last_name: &str) -> Self {
        self.contact.last_name = Some(last_name.to_string());
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.contact.phone = Some(phone.to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.contact.email = Some(email.to_string());
        self
    }

    pub fn build(self) -> Contact {
        self.contact
    }
}

/// Assembles a pickup dispatch. Defaults to as-soon-as-possible.
#[derive(Debug, Default)]
pub struct PickupBuilder {
    time: Option<i64>,
}

impl PickupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pickup as soon as possible (no scheduled time).
    pub fn for_asap(mut self) -> Self {
        self.time = None;
        self
    }

    /// Pickup at a scheduled time, epoch milliseconds.
    pub fn at(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn build(self) -> Dispatch {
        Dispatch::Takeout { time: self.time }
    }
}

/// Assembles a delivery dispatch.
#[derive(Debug, Default)]
pub struct DeliveryBuilder {
    address: Address,
    time: Option<i64>,
    charge: Option<f64>,
}

impl DeliveryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn street(mut self, street: &str) -> Self {
        self.address.street = Some(street.to_string());
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.address.city = Some(city.to_string());
        self
    }

    pub fn postal_code(mut self, postal_code: &str) -> Self {
        self.address.postal_code = Some(postal_code.to_string());
        self
    }

    pub fn at(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn build(self) -> Dispatch {
        Dispatch::Delivery {
            address: self.address,
            time: self.time,
            charge: self.charge,
        }
    }
}

/// Assembles a cash payment.
#[derive(Debug, Default)]
pub struct CashPaymentBuilder {
    amount: f64,
}

impl CashPaymentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> Payment {
        Payment::Cash { amount: self.amount }
    }
}
