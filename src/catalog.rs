use std::cell::RefCell;

use crate::models::Product;

/// The catalog collaborator: an effectively immutable product list with
/// read queries plus the two explicit stock-adjustment operations.
/// Checkout only validates against stock, it never decrements it.
#[derive(Debug, Default)]
pub struct Catalog {
    products: RefCell<Vec<Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RefCell::new(products),
        }
    }

    pub fn find_by_id(&self, id: i64) -> Option<Product> {
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Live stock for a product; `None` when the id is unknown.
    pub fn stock_of(&self, id: i64) -> Option<u32> {
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.stock)
    }

    pub fn all(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    /// Products matching a search term and holding every certification
    /// in `filters`. An empty term matches everything.
    pub fn search(&self, term: &str, filters: &[String]) -> Vec<Product> {
        let term = term.trim();
        self.products
            .borrow()
            .iter()
            .filter(|p| (term.is_empty() || p.matches_search(term)) && p.matches_filters(filters))
            .cloned()
            .collect()
    }

    /// All certifications across the catalog, sorted and deduplicated.
    pub fn certifications(&self) -> Vec<String> {
        let mut certs: Vec<String> = self
            .products
            .borrow()
            .iter()
            .flat_map(|p| p.certifications.iter().cloned())
            .collect();
        certs.sort();
        certs.dedup();
        certs
    }

    pub fn reduce_stock(&self, id: i64, quantity: u32) {
        let mut products = self.products.borrow_mut();
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            if product.stock >= quantity {
                product.stock -= quantity;
            }
        }
    }

    pub fn increase_stock(&self, id: i64, quantity: u32) {
        let mut products = self.products.borrow_mut();
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            product.stock += quantity;
        }
    }

    pub fn len(&self) -> usize {
        self.products.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.borrow().is_empty()
    }
}
