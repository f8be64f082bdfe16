use std::cell::RefCell;
use std::rc::Rc;

use tempfile::TempDir;
use violet_store::app::App;
use violet_store::data::StoreData;
use violet_store::error::StoreError;
use violet_store::events::EventBus;
use violet_store::format::money;
use violet_store::models::{OrderStatus, Product};
use violet_store::navigation::View;
use violet_store::notify::{Notifier, Severity};
use violet_store::services::discount::DiscountCode;
use violet_store::storage::Storage;

#[derive(Default)]
struct RecordingNotifier {
    messages: RefCell<Vec<(Severity, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages.borrow_mut().push((severity, message.to_string()));
    }
}

impl RecordingNotifier {
    fn errors(&self) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

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

fn store_data(products: Vec<Product>) -> StoreData {
    StoreData {
        products,
        discount_codes: vec![DiscountCode {
            code: "SAVE10".into(),
            discount: 10,
            description: None,
        }],
    }
}

fn assemble(products: Vec<Product>, dir: &TempDir) -> (App, Rc<RecordingNotifier>) {
    let storage = Storage::new(dir.path(), "test_").expect("storage");
    let notifier = Rc::new(RecordingNotifier::default());
    let app = App::assemble(
        store_data(products),
        storage,
        Rc::new(EventBus::new()),
        notifier.clone(),
    );
    (app, notifier)
}

fn signed_in(app: &mut App) {
    app.auth
        .register("Ana Pérez", "ana@example.com", "secret1")
        .expect("register");
}

#[test]
fn checkout_produces_one_order_and_resets_the_cart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (mut app, _notifier) = assemble(
        vec![product(1, "Serum", 1000, 10), product(2, "Balm", 500, 5)],
        &dir,
    );
    signed_in(&mut app);

    assert!(app.add_to_cart(1, 2));
    assert!(app.add_to_cart(2, 1));

    let order = app.process_checkout()?;

    assert_eq!(order.subtotal, 2500);
    assert_eq!(order.total, 2500);
    assert_eq!(order.user_id, "ana@example.com");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.status, OrderStatus::Processing);

    assert!(app.cart.is_empty());
    assert_eq!(app.cart.cart().discount_percentage(), 0);
    assert_eq!(app.order_history().len(), 1);
    assert_eq!(app.order_history()[0].id, order.id);
    assert_eq!(app.nav.current_view(), View::Profile);
    Ok(())
}

#[test]
fn unauthenticated_checkout_redirects_to_login() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, _notifier) = assemble(vec![product(1, "Serum", 1000, 10)], &dir);
    app.add_to_cart(1, 1);

    let result = app.process_checkout();

    assert!(matches!(result, Err(StoreError::Unauthenticated)));
    assert_eq!(app.nav.current_view(), View::Login);
    assert!(!app.cart.is_empty(), "an aborted checkout keeps the cart");
}

#[test]
fn empty_cart_yields_exactly_one_validation_error() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, _notifier) = assemble(vec![product(1, "Serum", 1000, 10)], &dir);
    signed_in(&mut app);

    match app.process_checkout() {
        Err(StoreError::CheckoutRejected(errors)) => {
            assert_eq!(errors, vec!["Cart is empty".to_string()]);
        }
        other => panic!("expected a rejected checkout, got {other:?}"),
    }
}

#[test]
fn over_stock_lines_report_insufficient_not_out_of_stock() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, notifier) = assemble(vec![product(1, "Serum", 1000, 1)], &dir);
    signed_in(&mut app);
    app.add_to_cart(1, 3);

    match app.process_checkout() {
        Err(StoreError::CheckoutRejected(errors)) => {
            assert_eq!(errors, vec!["Serum has insufficient stock".to_string()]);
        }
        other => panic!("expected a rejected checkout, got {other:?}"),
    }
    // Every validation error was also surfaced to the user.
    assert_eq!(notifier.errors(), vec!["Serum has insufficient stock".to_string()]);
}

#[test]
fn sold_out_lines_report_out_of_stock() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, _notifier) = assemble(vec![product(1, "Serum", 1000, 2)], &dir);
    signed_in(&mut app);
    app.add_to_cart(1, 2);
    // Stock drains to zero between adding and checking out.
    app.catalog.reduce_stock(1, 2);

    match app.process_checkout() {
        Err(StoreError::CheckoutRejected(errors)) => {
            assert_eq!(errors, vec!["Serum is out of stock".to_string()]);
        }
        other => panic!("expected a rejected checkout, got {other:?}"),
    }
}

#[test]
fn discounted_checkout_carries_the_code_into_the_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (mut app, _notifier) = assemble(vec![product(1, "Bundle", 100_000, 10)], &dir);
    signed_in(&mut app);
    app.add_to_cart(1, 1);

    assert!(app.apply_discount("  save10 "));
    let order = app.process_checkout()?;

    assert_eq!(order.subtotal, 100_000);
    assert_eq!(order.discount, 10_000);
    assert_eq!(order.total, 90_000);
    assert_eq!(order.discount_code.as_deref(), Some("SAVE10"));
    Ok(())
}

#[test]
fn savings_notifications_use_the_price_format() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, notifier) = assemble(vec![product(1, "Bundle", 100_000, 10)], &dir);
    app.add_to_cart(1, 1);

    assert!(app.apply_discount("SAVE10"));

    let applied = notifier
        .messages
        .borrow()
        .iter()
        .any(|(severity, message)| {
            *severity == Severity::Success && message == "Discount applied! You save $10.000"
        });
    assert!(applied, "savings are grouped like every rendered price");

    assert_eq!(money(10_000), "$10.000");
    assert_eq!(money(1_234_567), "$1.234.567");
    assert_eq!(money(0), "$0");
    assert_eq!(money(-2500), "-$2.500");
}

#[test]
fn blank_discount_codes_never_reach_the_resolver() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, notifier) = assemble(vec![product(1, "Serum", 1000, 10)], &dir);
    app.add_to_cart(1, 1);

    assert!(!app.apply_discount("   "));
    assert!(app.cart.cart().discount_code().is_none());
    let warned = notifier
        .messages
        .borrow()
        .iter()
        .any(|(severity, _)| *severity == Severity::Warning);
    assert!(warned, "blank input warns instead of erroring");
}

#[test]
fn profile_view_is_gated_behind_authentication() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, _notifier) = assemble(vec![], &dir);

    app.navigate(View::Profile);
    assert_eq!(app.nav.current_view(), View::Login);

    signed_in(&mut app);
    app.navigate(View::Profile);
    assert_eq!(app.nav.current_view(), View::Profile);
}

#[test]
fn order_history_survives_a_restart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let products = vec![product(1, "Serum", 1000, 10)];
    let order_id = {
        let (mut app, _notifier) = assemble(products.clone(), &dir);
        signed_in(&mut app);
        app.add_to_cart(1, 1);
        app.process_checkout()?.id
    };

    let (app, _notifier) = assemble(products, &dir);
    assert_eq!(app.order_history().len(), 1);
    assert_eq!(app.order_history()[0].id, order_id);
    Ok(())
}

#[test]
fn status_updates_go_through_the_transition_table() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (mut app, _notifier) = assemble(vec![product(1, "Serum", 1000, 10)], &dir);
    signed_in(&mut app);
    app.add_to_cart(1, 1);
    let order_id = app.process_checkout()?.id;

    app.update_order_status(order_id, OrderStatus::Shipped)?;
    assert_eq!(app.order_history()[0].status, OrderStatus::Shipped);

    assert!(app.update_order_status(order_id, OrderStatus::Cancelled).is_err());
    assert!(matches!(
        app.update_order_status(999, OrderStatus::Shipped),
        Err(StoreError::NotFound)
    ));
    Ok(())
}

#[test]
fn login_verifies_the_registered_credentials() {
    let dir = TempDir::new().expect("temp dir");
    let (mut app, _notifier) = assemble(vec![], &dir);
    signed_in(&mut app);
    app.auth.logout();
    assert!(!app.auth.is_authenticated());

    assert!(app.auth.login("ana@example.com", "wrong-password").is_err());
    assert!(!app.auth.is_authenticated());

    app.auth.login("ana@example.com", "secret1").expect("login");
    assert!(app.auth.is_authenticated());
    assert_eq!(
        app.auth.current_user().map(|u| u.email.as_str()),
        Some("ana@example.com")
    );
}
