use crate::domain::{CartItem, CartItemDraft};
use crate::entity::{required, RecordEntity};
use crate::error::MappingError;

use super::row::CartItemRow;

impl RecordEntity for CartItem {
    const TABLE: &'static str = "cart_item_c";
    const LABEL: &'static str = "cart item";
    const FIELDS: &'static [&'static str] = &["product_id_c", "name_c", "price_c", "quantity_c", "imageUrl_c"];

    type Row = CartItemRow;
    type Draft = CartItemDraft;

    fn from_row(row: CartItemRow) -> Result<Self, MappingError> {
        Ok(Self {
            id: required(row.id, Self::TABLE, "Id")?,
            product_id: required(row.product_id_c, Self::TABLE, "product_id_c")?,
            name: row.name_c.unwrap_or_default(),
            price: required(row.price_c, Self::TABLE, "price_c")?,
            quantity: required(row.quantity_c, Self::TABLE, "quantity_c")?,
            image_url: row.image_url_c.unwrap_or_default(),
        })
    }

    fn draft_row(draft: &CartItemDraft) -> Result<CartItemRow, MappingError> {
        Ok(CartItemRow {
            id: None,
            product_id_c: Some(draft.product_id),
            name_c: Some(draft.name.clone()),
            price_c: Some(draft.price),
            quantity_c: Some(draft.quantity),
            image_url_c: Some(draft.image_url.clone()),
        })
    }
}
