use crate::catalog::Catalog;
use crate::models::Cart;

/// Outcome of pre-checkout validation: valid iff no errors. Error
/// order is deterministic: the empty-cart error first, then one error
/// per offending line in cart order.
#[derive(Debug, Clone)]
pub struct CheckoutValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validates a cart against the catalog's current stock. A line whose
/// product has zero stock (or no longer exists) gets an out-of-stock
/// error; otherwise a quantity above stock gets an insufficient-stock
/// error. The two are mutually exclusive per line.
pub fn validate(cart: &Cart, catalog: &Catalog) -> CheckoutValidation {
    let mut errors = Vec::new();

    if cart.is_empty() {
        errors.push("Cart is empty".to_string());
    }

    for line in cart.lines() {
        let stock = catalog.stock_of(line.product.id).unwrap_or(0);
        if stock == 0 {
            errors.push(format!("{} is out of stock", line.product.name));
        } else if line.quantity > stock {
            errors.push(format!("{} has insufficient stock", line.product.name));
        }
    }

    CheckoutValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
