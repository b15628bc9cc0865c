use thiserror::Error;

use crate::actor_framework::EntityError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(String),
    #[error("Review already exists: {0}")]
    AlreadyExists(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("Review validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl EntityError for ReviewError {
    fn not_found(id: String) -> Self { Self::NotFound(id) }
    fn already_exists(id: String) -> Self { Self::AlreadyExists(id) }
    fn communication(message: String) -> Self { Self::ActorCommunicationError(message) }
}
