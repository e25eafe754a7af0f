use thiserror::Error;

use crate::record_store::StoreError;

/// A storage row that cannot be turned into its UI shape.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    #[error("{table} record is missing {field}")]
    MissingField { table: &'static str, field: &'static str },
    #[error("{table} record has malformed {field}: {reason}")]
    Malformed {
        table: &'static str,
        field: &'static str,
        reason: String,
    },
    #[error("Invalid {table} record: {reason}")]
    InvalidRecord { table: &'static str, reason: String },
}

/// Why a call produced a degraded (empty, `false`, or generic-error) result.
///
/// The public service methods collapse this into their UX value; the
/// `try_*` variants hand it back so callers can tell "empty" from "failed".
#[derive(Debug, Error)]
pub enum Degraded {
    #[error("Record store rejected the request: {0}")]
    Rejected(String),
    #[error("No record succeeded ({failed} failed)")]
    NoSuccess { failed: usize },
    #[error(transparent)]
    Transport(#[from] StoreError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}
