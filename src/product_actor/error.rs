use thiserror::Error;

use crate::actor_framework::EntityError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product already exists: {0}")]
    AlreadyExists(String),
    #[error("Product is not available: {0}")]
    Inactive(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock { product_id: String, requested: u32, available: u32 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl EntityError for ProductError {
    fn not_found(id: String) -> Self { Self::NotFound(id) }
    fn already_exists(id: String) -> Self { Self::AlreadyExists(id) }
    fn communication(message: String) -> Self { Self::ActorCommunicationError(message) }
}
