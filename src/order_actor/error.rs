use thiserror::Error;

use crate::actor_framework::EntityError;
use crate::coupon_actor::CouponError;
use crate::domain::{InvalidTransition, OrderStatus, PricingError};
use crate::product_actor::ProductError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Price changed for {product_id}: submitted {submitted}, current {current}")]
    PriceChanged { product_id: String, submitted: u64, current: u64 },
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error(transparent)]
    Coupon(#[from] CouponError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error("Tracking number cannot be set while order is {0}")]
    TrackingNotAllowed(OrderStatus),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl EntityError for OrderError {
    fn not_found(id: String) -> Self { Self::NotFound(id) }
    fn already_exists(id: String) -> Self { Self::AlreadyExists(id) }
    fn communication(message: String) -> Self { Self::ActorCommunicationError(message) }
}

impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) | ProductError::Inactive(id) => OrderError::InvalidProduct(id),
            ProductError::InsufficientStock { .. } | ProductError::InvalidQuantity(_) => {
                OrderError::InsufficientStock(err.to_string())
            }
            ProductError::ValidationError(message) => OrderError::ValidationError(message),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
