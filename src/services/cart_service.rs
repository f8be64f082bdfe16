use std::rc::Rc;

use crate::catalog::Catalog;
use crate::events::{AppEvent, EventBus};
use crate::format;
use crate::models::cart::CartLine;
use crate::models::{Cart, Product};
use crate::notify::Notifier;
use crate::services::checkout::{self, CheckoutValidation};
use crate::services::discount::DiscountCode;
use crate::storage::Storage;

/// Cart controller. Every mutating entry point funnels through
/// `after_mutation`, so a mutation is always followed by a persisted
/// snapshot and a `CartUpdated` broadcast, in that order.
pub struct CartService {
    cart: Cart,
    storage: Rc<Storage>,
    events: Rc<EventBus>,
    notifier: Rc<dyn Notifier>,
}

impl CartService {
    /// Restores the persisted snapshot, re-resolving each line against
    /// the catalog; lines whose product is gone are dropped.
    pub fn new(
        storage: Rc<Storage>,
        events: Rc<EventBus>,
        notifier: Rc<dyn Notifier>,
        catalog: &Catalog,
    ) -> Self {
        let cart = match storage.load_cart() {
            Some(snapshot) => Cart::restore(snapshot, |id| catalog.find_by_id(id)),
            None => Cart::new(),
        };
        Self {
            cart,
            storage,
            events,
            notifier,
        }
    }

    fn after_mutation(&self) {
        if !self.storage.save_cart(&self.cart.snapshot()) {
            tracing::warn!("cart persist failed; in-memory cart remains authoritative");
        }
        self.events.publish(&AppEvent::CartUpdated {
            total_items: self.cart.total_items(),
            total: self.cart.total(),
        });
    }

    /// Rejects out-of-stock products without touching the cart.
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> bool {
        if !product.is_in_stock() {
            self.notifier.error(&format!("{} is out of stock", product.name));
            return false;
        }
        self.cart.add_item(product.clone(), quantity.max(1));
        self.after_mutation();
        self.notifier
            .success(&format!("{} added to cart", product.name));
        true
    }

    pub fn remove_product(&mut self, product_id: i64) {
        self.cart.remove_item(product_id);
        self.after_mutation();
        self.notifier.info("Product removed from cart");
    }

    /// Zero removes the line; negatives are unrepresentable.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove_product(product_id);
            return;
        }
        self.cart.update_quantity(product_id, quantity);
        self.after_mutation();
    }

    pub fn increment_quantity(&mut self, product_id: i64) {
        if let Some(line) = self.cart.find_item(product_id) {
            let quantity = line.quantity + 1;
            self.update_quantity(product_id, quantity);
        }
    }

    pub fn decrement_quantity(&mut self, product_id: i64) {
        if let Some(line) = self.cart.find_item(product_id) {
            let quantity = line.quantity - 1;
            self.update_quantity(product_id, quantity);
        }
    }

    /// An absent descriptor (the resolver found nothing) is an error
    /// and leaves the cart untouched.
    pub fn apply_discount_code(&mut self, code: &str, descriptor: Option<&DiscountCode>) -> bool {
        let Some(descriptor) = descriptor else {
            self.notifier.error("Invalid discount code");
            return false;
        };
        self.cart.apply_discount(code, descriptor.discount);
        self.after_mutation();
        let savings = format::money(self.cart.discount_amount());
        self.notifier
            .success(&format!("Discount applied! You save {savings}"));
        true
    }

    pub fn remove_discount(&mut self) {
        self.cart.remove_discount();
        self.after_mutation();
        self.notifier.info("Discount removed");
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.after_mutation();
    }

    pub fn validate_checkout(&self, catalog: &Catalog) -> CheckoutValidation {
        checkout::validate(&self.cart, catalog)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn subtotal(&self) -> i64 {
        self.cart.subtotal()
    }

    pub fn discount_amount(&self) -> i64 {
        self.cart.discount_amount()
    }

    pub fn total(&self) -> i64 {
        self.cart.total()
    }

    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn has_product(&self, product_id: i64) -> bool {
        self.cart.find_item(product_id).is_some()
    }

    pub fn product_quantity(&self, product_id: i64) -> u32 {
        self.cart.find_item(product_id).map_or(0, |l| l.quantity)
    }
}
