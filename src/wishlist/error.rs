use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum WishlistError {
    #[error("Wishlist item not found")]
    NotFound,
    #[error("Failed to create wishlist item")]
    CreateFailed,
}
