use serde::{Deserialize, Serialize};

use crate::record_store::RecordId;

/// Flat `order_c` row as stored remotely.
///
/// Shipping and billing sub-objects are flattened into prefixed columns and
/// the line items travel as JSON text in `items_c`. The order date is kept
/// as the text the store holds; it is parsed when mapped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_c: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_first_name_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_last_name_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_address_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_city_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_state_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_zip_code_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_country_c: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info_email_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info_phone_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info_address_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info_city_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info_state_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_info_zip_code_c: Option<String>,
}
