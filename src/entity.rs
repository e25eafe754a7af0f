use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::MappingError;
use crate::record_store::{FetchQuery, Record};

/// Trait that any UI-shaped entity must implement to be served by
/// [`RecordService`](crate::services::RecordService).
///
/// `Row` is the flat storage shape (`*_c` field names); `Draft` is what
/// callers submit on create/update. Both directions of the mapping live
/// here so they stay symmetric.
pub trait RecordEntity: Clone + Send + Sync + 'static {
    /// Remote table name, e.g. `product_c`.
    const TABLE: &'static str;
    /// Human label used in log lines, e.g. `product`.
    const LABEL: &'static str;
    /// Storage fields requested on every read.
    const FIELDS: &'static [&'static str];

    type Row: Serialize + DeserializeOwned + Send + Debug;
    type Draft: Send + Sync + Debug;

    /// Flat row to UI shape.
    fn from_row(row: Self::Row) -> Result<Self, MappingError>;

    /// UI draft to flat row. The row carries no `Id`.
    fn draft_row(draft: &Self::Draft) -> Result<Self::Row, MappingError>;

    fn query() -> FetchQuery {
        FetchQuery::fields(Self::FIELDS)
    }

    fn decode(record: Value) -> Result<Self, MappingError> {
        let row = serde_json::from_value(record).map_err(|e| MappingError::InvalidRecord {
            table: Self::TABLE,
            reason: e.to_string(),
        })?;
        Self::from_row(row)
    }

    fn encode(row: &Self::Row) -> Result<Record, MappingError> {
        match serde_json::to_value(row) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(other) => Err(MappingError::InvalidRecord {
                table: Self::TABLE,
                reason: format!("row serialized to {other}"),
            }),
            Err(e) => Err(MappingError::InvalidRecord {
                table: Self::TABLE,
                reason: e.to_string(),
            }),
        }
    }
}

/// Unwrap a required row field or name it in the error.
pub(crate) fn required<T>(value: Option<T>, table: &'static str, field: &'static str) -> Result<T, MappingError> {
    value.ok_or(MappingError::MissingField { table, field })
}
