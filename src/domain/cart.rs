use serde::{Deserialize, Serialize};

use super::{OrderLineItem, Product};
use crate::record_store::RecordId;

/// A product sitting in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub product_id: RecordId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image_url: String,
}

/// Payload for adding a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemDraft {
    pub product_id: RecordId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image_url: String,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl CartItemDraft {
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
        }
    }
}

impl From<&CartItem> for CartItemDraft {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            image_url: item.image_url.clone(),
        }
    }
}

impl From<&CartItem> for OrderLineItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            image_url: Some(item.image_url.clone()).filter(|url| !url.is_empty()),
        }
    }
}
