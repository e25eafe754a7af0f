use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::domain::{BillingInfo, Order, OrderDraft, OrderLineItem, OrderStatus, ShippingAddress};
use crate::entity::{required, RecordEntity};
use crate::error::MappingError;

use super::row::OrderRow;

const ITEMS_FIELD: &str = "items_c";

impl RecordEntity for Order {
    const TABLE: &'static str = "order_c";
    const LABEL: &'static str = "order";
    const FIELDS: &'static [&'static str] = &[
        "order_date_c",
        "status_c",
        "total_c",
        "items_c",
        "shipping_address_first_name_c",
        "shipping_address_last_name_c",
        "shipping_address_address_c",
        "shipping_address_city_c",
        "shipping_address_state_c",
        "shipping_address_zip_code_c",
        "shipping_address_country_c",
        "billing_info_email_c",
        "billing_info_phone_c",
        "billing_info_address_c",
        "billing_info_city_c",
        "billing_info_state_c",
        "billing_info_zip_code_c",
    ];

    type Row = OrderRow;
    type Draft = OrderDraft;


    fn from_row(row: OrderRow) -> Result<Self, MappingError> {
        let items = parse_items(row.items_c.as_deref())?;

        Ok(Self {
            id: required(row.id, Self::TABLE, "Id")?,
            order_date: row.order_date_c.as_deref().and_then(parse_order_date),
            status: row.status_c.map(OrderStatus::from).unwrap_or(OrderStatus::Pending),
            total: row.total_c,
            items,
            shipping_address: ShippingAddress {
                first_name: row.shipping_address_first_name_c.unwrap_or_default(),
                last_name: row.shipping_address_last_name_c.unwrap_or_default(),
                address: row.shipping_address_address_c.unwrap_or_default(),
                city: row.shipping_address_city_c.unwrap_or_default(),
                state: row.shipping_address_state_c.unwrap_or_default(),
                zip_code: row.shipping_address_zip_code_c.unwrap_or_default(),
                country: row.shipping_address_country_c.unwrap_or_default(),
            },
            billing_info: BillingInfo {
                email: row.billing_info_email_c.unwrap_or_default(),
                phone: row.billing_info_phone_c.unwrap_or_default(),
                address: row.billing_info_address_c.unwrap_or_default(),
                city: row.billing_info_city_c.unwrap_or_default(),
                state: row.billing_info_state_c.unwrap_or_default(),
                zip_code: row.billing_info_zip_code_c.unwrap_or_default(),
            },
        })
    }

    /// New orders are stamped with the current time and `Confirmed`.
    fn draft_row(draft: &OrderDraft) -> Result<OrderRow, MappingError> {
        let items = serde_json::to_string(&draft.items).map_err(|e| MappingError::Malformed {
            table: Self::TABLE,
            field: ITEMS_FIELD,
            reason: e.to_string(),
        })?;
        let shipping = &draft.shipping_address;
        let billing = &draft.billing_info;

        Ok(OrderRow {
            id: None,
            order_date_c: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            status_c: Some(OrderStatus::Confirmed.to_string()),
            total_c: Some(draft.total),
            items_c: Some(items),
            shipping_address_first_name_c: Some(shipping.first_name.clone()),
            shipping_address_last_name_c: Some(shipping.last_name.clone()),
            shipping_address_address_c: Some(shipping.address.clone()),
            shipping_address_city_c: Some(shipping.city.clone()),
            shipping_address_state_c: Some(shipping.state.clone()),
            shipping_address_zip_code_c: Some(shipping.zip_code.clone()),
            shipping_address_country_c: Some(shipping.country.clone()),
            billing_info_email_c: Some(billing.email.clone()),
            billing_info_phone_c: Some(billing.phone.clone()),
            billing_info_address_c: Some(billing.address.clone()),
            billing_info_city_c: Some(billing.city.clone()),
            billing_info_state_c: Some(billing.state.clone()),
            billing_info_zip_code_c: Some(billing.zip_code.clone()),
        })
    }
}

/// Offset timestamps, naive timestamps (taken as UTC) and bare dates
/// (midnight UTC). Anything else reads as no date.
fn parse_order_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Absent or blank blobs mean no items; anything else must parse.
fn parse_items(blob: Option<&str>) -> Result<Vec<OrderLineItem>, MappingError> {
    match blob.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text).map_err(|e| MappingError::Malformed {
            table: Order::TABLE,
            field: ITEMS_FIELD,
            reason: e.to_string(),
        }),
    }
}
