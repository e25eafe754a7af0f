//! Table rules and demo data for the in-memory record store.

use crate::domain::{CartItem, Order, Product, ProductDraft, WishlistItem};
use crate::entity::RecordEntity;
use crate::error::MappingError;
use crate::record_store::{Record, RecordStoreActor};

/// Applies the hosted tables' required-field rules.
pub fn with_table_rules(actor: RecordStoreActor) -> RecordStoreActor {
    actor
        .require_fields(Product::TABLE, &["name_c", "price_c"])
        .require_fields(Order::TABLE, &["order_date_c", "total_c"])
        .require_fields(CartItem::TABLE, &["product_id_c", "price_c", "quantity_c"])
        .require_fields(WishlistItem::TABLE, &["product_id_c"])
}

pub fn demo_catalog() -> Vec<ProductDraft> {
    vec![
        ProductDraft::new("Wireless Headphones", 129.99, "Electronics")
            .with_description("Over-ear, 30 hour battery")
            .with_image_url("https://images.example.com/headphones.jpg"),
        ProductDraft::new("Smart Watch", 199.0, "Electronics")
            .with_description("Heart rate, GPS and sleep tracking")
            .with_image_url("https://images.example.com/watch.jpg"),
        ProductDraft::new("Blue Oxford Shirt", 45.5, "Apparel")
            .with_description("Slim fit cotton shirt")
            .with_image_url("https://images.example.com/shirt.jpg"),
        ProductDraft::new("Running Shoes", 89.0, "Apparel")
            .with_image_url("https://images.example.com/shoes.jpg"),
        ProductDraft::new("Ceramic Mug", 12.0, "Home")
            .with_description("350 ml, dishwasher safe")
            .with_image_url("https://images.example.com/mug.jpg"),
        ProductDraft::new("Desk Lamp", 38.75, "Home")
            .with_image_url("https://images.example.com/lamp.jpg"),
    ]
}

/// Storage rows for `drafts`, ready for [`RecordStoreActor::seed`].
pub fn product_records(drafts: &[ProductDraft]) -> Result<Vec<Record>, MappingError> {
    drafts
        .iter()
        .map(|draft| Product::encode(&Product::draft_row(draft)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_maps_to_rows() {
        let records = product_records(&demo_catalog()).unwrap();
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.contains_key("name_c") && !r.contains_key("Id")));
    }
}
