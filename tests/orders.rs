use violet_store::models::{Cart, Order, OrderStatus, Product};

fn product(id: i64, name: &str, price: i64, stock: u32) -> Product {
    Product {
        id,
        name: name.into(),
        price,
        category: "test".into(),
        description: None,
        ingredients: Vec::new(),
        certifications: Vec::new(),
        stock,
    }
}

fn filled_cart() -> Cart {
    let mut cart = Cart::new();
    cart.add_item(product(1, "Serum", 1000, 10), 2);
    cart.add_item(product(2, "Balm", 500, 10), 1);
    cart
}

#[test]
fn from_cart_freezes_the_totals_and_flattens_the_lines() {
    let mut cart = filled_cart();
    cart.apply_discount("SAVE10", 10);

    let order = Order::from_cart(&cart, "ana@example.com");

    assert_eq!(order.user_id, "ana@example.com");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product_name, "Serum");
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.subtotal, 2500);
    assert_eq!(order.discount, 250);
    assert_eq!(order.total, 2250);
    assert_eq!(order.discount_code.as_deref(), Some("SAVE10"));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.total_items(), 3);
}

#[test]
fn order_ids_are_unique_even_in_the_same_millisecond() {
    let cart = filled_cart();
    let a = Order::from_cart(&cart, "ana@example.com");
    let b = Order::from_cart(&cart, "ana@example.com");
    let c = Order::from_cart(&cart, "ana@example.com");
    assert!(a.id < b.id && b.id < c.id);
}

#[test]
fn from_persisted_round_trips_verbatim() {
    let order = Order::from_cart(&filled_cart(), "ana@example.com");

    let value = serde_json::to_value(&order).expect("serialize");
    let restored = Order::from_persisted(value).expect("deserialize");

    assert_eq!(restored.id, order.id);
    assert_eq!(restored.items, order.items);
    assert_eq!(restored.subtotal, order.subtotal);
    assert_eq!(restored.discount, order.discount);
    assert_eq!(restored.total, order.total);
    assert_eq!(restored.status, order.status);
    assert_eq!(restored.created_at, order.created_at);
}

#[test]
fn status_follows_the_transition_table() {
    let mut order = Order::from_cart(&filled_cart(), "ana@example.com");
    assert!(order.can_be_cancelled());

    order.update_status(OrderStatus::Shipped).expect("processing may ship");
    assert!(!order.can_be_cancelled());

    // Shipped orders cannot be cancelled or reopened.
    assert!(order.update_status(OrderStatus::Cancelled).is_err());
    assert!(order.update_status(OrderStatus::Processing).is_err());

    order.update_status(OrderStatus::Delivered).expect("shipped may deliver");
    assert!(OrderStatus::Delivered.is_terminal());
    assert!(order.update_status(OrderStatus::Processing).is_err());
}

#[test]
fn cancelling_is_only_possible_while_processing() {
    let mut order = Order::from_cart(&filled_cart(), "ana@example.com");
    order.update_status(OrderStatus::Cancelled).expect("processing may cancel");
    assert!(order.status.is_terminal());
    assert!(order.update_status(OrderStatus::Shipped).is_err());
}

#[test]
fn update_status_refreshes_updated_at_only() {
    let mut order = Order::from_cart(&filled_cart(), "ana@example.com");
    let created = order.created_at;
    let before = order.updated_at;

    order.update_status(OrderStatus::Shipped).expect("transition");

    assert_eq!(order.created_at, created);
    assert!(order.updated_at >= before);
}
