use thiserror::Error;

use crate::actor_framework::EntityError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    #[error("Wishlist item not found: {0}")]
    NotFound(String),
    #[error("Product already in wishlist: {0}")]
    AlreadyExists(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Wishlist validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl EntityError for WishlistError {
    fn not_found(id: String) -> Self { Self::NotFound(id) }
    fn already_exists(id: String) -> Self { Self::AlreadyExists(id) }
    fn communication(message: String) -> Self { Self::ActorCommunicationError(message) }
}
