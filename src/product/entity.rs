use crate::domain::{Product, ProductDraft};
use crate::entity::{required, RecordEntity};
use crate::error::MappingError;

use super::row::ProductRow;

impl RecordEntity for Product {
    const TABLE: &'static str = "product_c";
    const LABEL: &'static str = "product";
    const FIELDS: &'static [&'static str] = &[
        "name_c",
        "price_c",
        "description_c",
        "category_c",
        "imageUrl_c",
        "in_stock_c",
    ];

    type Row = ProductRow;
    type Draft = ProductDraft;

    /// `Id`, `name_c` and `price_c` are mandatory; the rest default to empty.
    fn from_row(row: ProductRow) -> Result<Self, MappingError> {
        Ok(Self {
            id: required(row.id, Self::TABLE, "Id")?,
            name: required(row.name_c, Self::TABLE, "name_c")?,
            price: required(row.price_c, Self::TABLE, "price_c")?,
            description: row.description_c.unwrap_or_default(),
            category: row.category_c.unwrap_or_default(),
            image_url: row.image_url_c.unwrap_or_default(),
            in_stock: row.in_stock_c.unwrap_or(false),
        })
    }

    fn draft_row(draft: &ProductDraft) -> Result<ProductRow, MappingError> {
        Ok(ProductRow {
            id: None,
            name_c: Some(draft.name.clone()),
            price_c: Some(draft.price),
            description_c: Some(draft.description.clone()),
            category_c: Some(draft.category.clone()),
            image_url_c: Some(draft.image_url.clone()),
            in_stock_c: Some(draft.in_stock),
        })
    }
}
