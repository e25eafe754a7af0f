use serde::{Deserialize, Serialize};

use crate::record_store::RecordId;

/// Flat `product_c` row as stored remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_c: Option<String>,
    #[serde(rename = "imageUrl_c", skip_serializing_if = "Option::is_none")]
    pub image_url_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock_c: Option<bool>,
}
