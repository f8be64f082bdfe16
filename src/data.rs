use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::StoreResult;
use crate::models::Product;
use crate::services::discount::DiscountCode;

/// Contents of the static data file shipped with the store.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,
}

/// Loads the catalog and discount table. A missing or malformed file is
/// a startup error; an empty storefront would only hide misconfiguration.
pub fn load_data(path: &Path) -> StoreResult<StoreData> {
    let raw = fs::read_to_string(path)?;
    let data: StoreData = serde_json::from_str(&raw)?;
    tracing::info!(
        path = %path.display(),
        products = data.products.len(),
        discount_codes = data.discount_codes.len(),
        "store data loaded"
    );
    Ok(data)
}
