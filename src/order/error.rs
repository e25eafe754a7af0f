use thiserror::Error;

/// User-facing order failures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,
    #[error("Failed to create order")]
    CreateFailed,
    #[error("Failed to update order status")]
    UpdateStatusFailed,
}
