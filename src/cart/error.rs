use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart item not found")]
    NotFound,
    #[error("Failed to create cart item")]
    CreateFailed,
    #[error("Failed to update cart item")]
    UpdateFailed,
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
}
