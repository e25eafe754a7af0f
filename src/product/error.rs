use thiserror::Error;

/// User-facing product failures. Underlying detail is logged, not carried.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,
    #[error("Failed to create product")]
    CreateFailed,
    #[error("Failed to update product")]
    UpdateFailed,
}
