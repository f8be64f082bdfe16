use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::cart::Cart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Legal transitions: Processing may ship or cancel, Shipped may
    /// deliver, Delivered and Cancelled are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// A line flattened out of the cart at checkout time, decoupled from
/// the live product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub price: i64,
    pub quantity: u32,
}

/// Immutable snapshot of a cart taken at checkout. Items and pricing
/// are frozen at creation; only `status` and `updated_at` change
/// afterwards, through `update_status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
    pub discount_code: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Time-derived id, forced strictly increasing within the process so
/// two checkouts in the same millisecond cannot collide.
fn next_order_id() -> i64 {
    static LAST: AtomicI64 = AtomicI64::new(0);
    let now = Utc::now().timestamp_millis();
    let prev = LAST
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(0);
    now.max(prev + 1)
}

impl Order {
    pub fn from_cart(cart: &Cart, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Order {
            id: next_order_id(),
            user_id: user_id.into(),
            items: cart
                .lines()
                .iter()
                .map(|l| OrderItem {
                    product_id: l.product.id,
                    product_name: l.product.name.clone(),
                    price: l.product.price,
                    quantity: l.quantity,
                })
                .collect(),
            subtotal: cart.subtotal(),
            discount: cart.discount_amount(),
            total: cart.total(),
            discount_code: cart.discount_code().map(str::to_owned),
            status: OrderStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a previously serialized order verbatim; the
    /// persisted numbers are trusted, nothing is re-derived.
    pub fn from_persisted(value: serde_json::Value) -> StoreResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn update_status(&mut self, next: OrderStatus) -> StoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(StoreError::BadRequest(format!(
                "cannot change order status from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn can_be_cancelled(&self) -> bool {
        self.status == OrderStatus::Processing
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
