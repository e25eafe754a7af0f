use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record_store::RecordId;

/// Flat `wishlist_item_c` row as stored remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WishlistItemRow {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id_c: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_at_c: Option<DateTime<Utc>>,
}
