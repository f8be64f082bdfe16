use serde::{Deserialize, Serialize};

use crate::models::product::Product;

/// One product paired with a positive quantity. A quantity of zero is
/// never stored; the line is removed instead.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// The live shopping cart: ordered lines plus optional discount state.
/// Discount code and percentage travel together; both are cleared by
/// `remove_discount` and `clear`. All totals are recomputed on demand.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount_code: Option<String>,
    discount_percentage: u8,
}

/// Persisted form of the cart. Lines keep only the product id; on load
/// they are re-resolved against the catalog and dropped if the product
/// no longer exists. Field names match the previously persisted JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<SnapshotLine>,
    pub discount_code: Option<String>,
    pub discount_percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLine {
    pub product_id: i64,
    pub quantity: u32,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges into the existing line for the same product id, otherwise
    /// appends a new line, preserving insertion order. Stock gating is
    /// the caller's job.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    /// Idempotent: absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Overwrites the line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn find_item(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn subtotal(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| l.product.price * i64::from(l.quantity))
            .sum()
    }

    pub fn discount_amount(&self) -> i64 {
        self.subtotal() * i64::from(self.discount_percentage) / 100
    }

    pub fn total(&self) -> i64 {
        self.subtotal() - self.discount_amount()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Unconditional overwrite; range validation happens at the
    /// discount resolver before this is called.
    pub fn apply_discount(&mut self, code: impl Into<String>, percentage: u8) {
        self.discount_code = Some(code.into());
        self.discount_percentage = percentage;
    }

    pub fn remove_discount(&mut self) {
        self.discount_code = None;
        self.discount_percentage = 0;
    }

    /// Empties the lines and removes any discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.remove_discount();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn discount_code(&self) -> Option<&str> {
        self.discount_code.as_deref()
    }

    pub fn discount_percentage(&self) -> u8 {
        self.discount_percentage
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self
                .lines
                .iter()
                .map(|l| SnapshotLine {
                    product_id: l.product.id,
                    quantity: l.quantity,
                })
                .collect(),
            discount_code: self.discount_code.clone(),
            discount_percentage: self.discount_percentage,
        }
    }

    /// Rebuilds a cart from a persisted snapshot. `resolve` maps a
    /// product id to the catalog's current record; lines whose product
    /// is gone are dropped.
    pub fn restore<F>(snapshot: CartSnapshot, resolve: F) -> Self
    where
        F: Fn(i64) -> Option<Product>,
    {
        let mut cart = Cart {
            lines: Vec::new(),
            discount_code: snapshot.discount_code,
            discount_percentage: snapshot.discount_percentage,
        };
        for item in snapshot.items {
            if item.quantity == 0 {
                continue;
            }
            match resolve(item.product_id) {
                Some(product) => cart.add_item(product, item.quantity),
                None => tracing::warn!(
                    product_id = item.product_id,
                    "dropping cart line for unknown product"
                ),
            }
        }
        cart
    }
}
