use serde::{Deserialize, Serialize};

/// Catalog product record. Price is in minor units and never negative;
/// stock adjustments go through the catalog, never through cart code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub stock: u32,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= 5
    }

    pub fn has_certification(&self, certification: &str) -> bool {
        self.certifications.iter().any(|c| c == certification)
    }

    /// Case-insensitive match against name, category or any ingredient.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
            || self
                .ingredients
                .iter()
                .any(|ing| ing.to_lowercase().contains(&term))
    }

    /// Every active filter must be a certification the product holds.
    pub fn matches_filters(&self, filters: &[String]) -> bool {
        filters.iter().all(|f| self.has_certification(f))
    }
}
