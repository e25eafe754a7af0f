use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record_store::RecordId;

/// Lifecycle state of an order. Unknown values from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Pending" => Self::Pending,
            "Confirmed" => Self::Confirmed,
            "Shipped" => Self::Shipped,
            "Delivered" => Self::Delivered,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(status),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(status: &str) -> Self {
        Self::from(status.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One purchased product inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: RecordId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl OrderLineItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Represents a placed customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "Id")]
    pub id: RecordId,
    /// `None` when the store holds no readable date.
    pub order_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub total: Option<f64>,
    pub items: Vec<OrderLineItem>,
    pub shipping_address: ShippingAddress,
    pub billing_info: BillingInfo,
}

/// Payload for placing a new order.
///
/// Date and status are stamped when the order is written.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub total: f64,
    pub items: Vec<OrderLineItem>,
    pub shipping_address: ShippingAddress,
    pub billing_info: BillingInfo,
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            total: order.total.unwrap_or_default(),
            items: order.items.clone(),
            shipping_address: order.shipping_address.clone(),
            billing_info: order.billing_info.clone(),
        }
    }
}
