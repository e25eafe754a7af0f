use serde::{Deserialize, Serialize};

use crate::record_store::RecordId;

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
}

impl Product {
    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description: String::new(),
            category: category.into(),
            image_url: String::new(),
            in_stock: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            in_stock: product.in_stock,
        }
    }
}
