use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;
use crate::record_store::RecordId;

/// A product the shopper saved for later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub product_id: RecordId,
    pub name: String,
    pub added_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistDraft {
    pub product_id: RecordId,
    pub name: String,
}

impl WishlistDraft {
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
        }
    }
}
