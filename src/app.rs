use std::rc::Rc;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::data::{self, StoreData};
use crate::error::{StoreError, StoreResult};
use crate::events::{AppEvent, EventBus};
use crate::models::{Order, OrderStatus};
use crate::navigation::{LogSurface, Navigator, View};
use crate::notify::{LogNotifier, Notifier};
use crate::services::auth_service::AuthService;
use crate::services::cart_service::CartService;
use crate::services::discount::{self, DiscountTable};
use crate::storage::Storage;

/// Composition root: owns every collaborator, wires the shared event
/// bus, and carries the cross-component flows (checkout sequencing and
/// the profile auth gate).
pub struct App {
    pub catalog: Catalog,
    pub cart: CartService,
    pub auth: AuthService,
    pub nav: Navigator,
    discounts: DiscountTable,
    storage: Rc<Storage>,
    events: Rc<EventBus>,
    notifier: Rc<dyn Notifier>,
    order_history: Vec<Order>,
}

impl App {
    pub fn new(config: &AppConfig) -> StoreResult<Self> {
        let data = data::load_data(&config.data_path)?;
        let storage = Storage::new(&config.storage_dir, &config.storage_prefix)?;
        Ok(Self::assemble(
            data,
            storage,
            Rc::new(EventBus::new()),
            Rc::new(LogNotifier),
        ))
    }

    pub fn assemble(
        data: StoreData,
        storage: Storage,
        events: Rc<EventBus>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let storage = Rc::new(storage);
        let catalog = Catalog::new(data.products);
        let discounts = DiscountTable::new(data.discount_codes);
        let auth = AuthService::new(Rc::clone(&storage), Rc::clone(&events));
        let cart = CartService::new(
            Rc::clone(&storage),
            Rc::clone(&events),
            Rc::clone(&notifier),
            &catalog,
        );
        let nav = Navigator::new(Box::new(LogSurface), Rc::clone(&events));
        let order_history = storage.order_history();
        tracing::info!(
            products = catalog.len(),
            orders = order_history.len(),
            "store assembled"
        );
        Self {
            catalog,
            cart,
            auth,
            nav,
            discounts,
            storage,
            events,
            notifier,
            order_history,
        }
    }

    pub fn events(&self) -> Rc<EventBus> {
        Rc::clone(&self.events)
    }

    pub fn add_to_cart(&mut self, product_id: i64, quantity: u32) -> bool {
        match self.catalog.find_by_id(product_id) {
            Some(product) => self.cart.add_product(&product, quantity),
            None => {
                self.notifier.error("Product not found");
                false
            }
        }
    }

    /// Normalizes the raw code, then resolves it against the table and
    /// delegates. Empty input never reaches the resolver.
    pub fn apply_discount(&mut self, raw_code: &str) -> bool {
        let Some(code) = discount::normalize_code(raw_code) else {
            self.notifier.warning("Enter a discount code");
            return false;
        };
        let descriptor = self.discounts.resolve(&code).cloned();
        self.cart.apply_discount_code(&code, descriptor.as_ref())
    }

    /// Navigation plus the auth gate: the profile view requires a
    /// signed-in identity and redirects to login otherwise.
    pub fn navigate(&mut self, view: View) {
        if view == View::Profile && !self.auth.is_authenticated() {
            self.nav.navigate_to(View::Login);
            return;
        }
        self.nav.navigate_to(view);
    }

    /// Checkout sequencing. Order matters: the order is persisted
    /// before the cart is cleared, so a storage failure can never lose
    /// the pending purchase.
    pub fn process_checkout(&mut self) -> StoreResult<Order> {
        if !self.auth.is_authenticated() {
            self.nav.navigate_to(View::Login);
            return Err(StoreError::Unauthenticated);
        }

        let validation = self.cart.validate_checkout(&self.catalog);
        if !validation.is_valid {
            for error in &validation.errors {
                self.notifier.error(error);
            }
            return Err(StoreError::CheckoutRejected(validation.errors));
        }

        let user_id = self
            .auth
            .current_user()
            .map(|u| u.email.clone())
            .ok_or(StoreError::Unauthenticated)?;
        let order = Order::from_cart(self.cart.cart(), user_id);

        self.storage.push_order(&order);
        self.order_history.push(order.clone());
        self.events.publish(&AppEvent::OrderCreated {
            order_id: order.id,
            total: order.total,
        });

        self.cart.clear_cart();
        self.notifier.success("Order placed successfully!");
        self.nav.navigate_to(View::Profile);
        Ok(order)
    }

    /// The single post-creation mutation an order allows; the updated
    /// history is persisted in place.
    pub fn update_order_status(&mut self, order_id: i64, status: OrderStatus) -> StoreResult<()> {
        let order = self
            .order_history
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(StoreError::NotFound)?;
        order.update_status(status)?;
        self.storage.save_order_history(&self.order_history);
        Ok(())
    }

    pub fn order_history(&self) -> &[Order] {
        &self.order_history
    }

    pub fn orders_for_current_user(&self) -> Vec<&Order> {
        match self.auth.current_user() {
            Some(user) => self
                .order_history
                .iter()
                .filter(|o| o.user_id == user.email)
                .collect(),
            None => Vec::new(),
        }
    }
}
