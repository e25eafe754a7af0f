//! Wire shapes shared by every record store adapter.
//!
//! Field names follow the remote API verbatim (`Name`, `FieldName`,
//! `sorttype`, `RecordIds`, ...), so these types serialize straight into
//! request bodies and deserialize straight out of responses.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier the record store assigns to every row.
pub type RecordId = i64;

/// A flat storage row, keyed by storage field name.
pub type Record = Map<String, Value>;

/// Name of the identifier column present on every table.
pub const ID_FIELD: &str = "Id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

/// One entry of the `fields` projection list: `{"field": {"Name": "..."}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: FieldName,
}

impl FieldSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    EqualTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: FilterOperator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub sorttype: SortType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: usize,
    pub offset: usize,
}

/// Query body for `fetch_records` and `get_record_by_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchQuery {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WhereClause>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(rename = "pagingInfo", default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<PagingInfo>,
}

impl FetchQuery {
    pub fn fields(names: &[&str]) -> Self {
        Self {
            fields: names.iter().map(|name| FieldSpec::named(*name)).collect(),
            ..Self::default()
        }
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(WhereClause {
            field_name: field.into(),
            operator: FilterOperator::EqualTo,
            values: vec![value.into()],
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, sorttype: SortType) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.into(),
            sorttype,
        });
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.paging = Some(PagingInfo { limit, offset });
        self
    }
}

/// Body for `create_record` and `update_record`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsPayload {
    pub records: Vec<Record>,
}

/// Body for `delete_record`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<RecordId>,
}

/// A field-level validation failure on one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "fieldLabel", default)]
    pub field_label: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.field_label.is_empty(), self.message.is_empty()) {
            (_, true) => f.write_str(&self.field_label),
            (true, false) => f.write_str(&self.message),
            (false, false) => write!(f, "{}: {}", self.field_label, self.message),
        }
    }
}

/// Outcome for a single record inside a batch write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecordResult {
    pub fn succeeded(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            errors: Vec::new(),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            message: Some(message.into()),
        }
    }
}

/// Envelope every adapter call resolves to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
}

impl StoreResponse {
    pub fn with_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn with_results(results: Vec<RecordResult>) -> Self {
        Self {
            success: true,
            results: Some(results),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// The adapter's message, or a fallback naming the table.
    pub fn message_or(&self, table: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("Request against {table} failed"))
    }
}
