use serde::{Deserialize, Serialize};

use crate::record_store::RecordId;

/// Flat `cart_item_c` row as stored remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartItemRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id_c: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_c: Option<u32>,
    #[serde(rename = "imageUrl_c", skip_serializing_if = "Option::is_none")]
    pub image_url_c: Option<String>,
}
