use chrono::Utc;

use crate::domain::{WishlistDraft, WishlistItem};
use crate::entity::{required, RecordEntity};
use crate::error::MappingError;

use super::row::WishlistItemRow;

impl RecordEntity for WishlistItem {
    const TABLE: &'static str = "wishlist_item_c";
    const LABEL: &'static str = "wishlist item";
    const FIELDS: &'static [&'static str] = &["product_id_c", "name_c", "added_at_c"];

    type Row = WishlistItemRow;
    type Draft = WishlistDraft;

    fn from_row(row: WishlistItemRow) -> Result<Self, MappingError> {
        Ok(Self {
            id: required(row.id, Self::TABLE, "Id")?,
            product_id: required(row.product_id_c, Self::TABLE, "product_id_c")?,
            name: row.name_c.unwrap_or_default(),
            added_at: row.added_at_c,
        })
    }

    fn draft_row(draft: &WishlistDraft) -> Result<WishlistItemRow, MappingError> {
        Ok(WishlistItemRow {
            id: None,
            product_id_c: Some(draft.product_id),
            name_c: Some(draft.name.clone()),
            added_at_c: Some(Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn create_mapping_reproduces_stored_fields() {
        let original = WishlistItemRow {
            id: Some(12),
            product_id_c: Some(3),
            name_c: Some("Desk Lamp".to_string()),
            added_at_c: Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()),
        };
        let item = WishlistItem::from_row(original.clone()).unwrap();
        assert_eq!(item.product_id, 3);

        let draft = WishlistDraft {
            product_id: item.product_id,
            name: item.name.clone(),
        };
        let written = WishlistItem::draft_row(&draft).unwrap();

        // The save time is stamped when written.
        assert!(written.added_at_c.is_some());
        assert_eq!(
            written,
            WishlistItemRow {
                id: None,
                added_at_c: written.added_at_c,
                ..original
            }
        );
    }

    #[test]
    fn missing_product_id_is_rejected() {
        let err = WishlistItem::decode(json!({"Id": 1, "name_c": "Lamp"})).unwrap_err();
        assert_eq!(
            err,
            MappingError::MissingField {
                table: "wishlist_item_c",
                field: "product_id_c"
            }
        );
    }
}
