use thiserror::Error;

use crate::actor_framework::EntityError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Invalid or expired coupon: {0}")]
    NotFoundOrExpired(String),
    #[error("Coupon usage limit exceeded: {0}")]
    UsageLimitExceeded(String),
    #[error("Coupon already exists: {0}")]
    AlreadyExists(String),
    #[error("Coupon validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl EntityError for CouponError {
    fn not_found(id: String) -> Self { Self::NotFoundOrExpired(id) }
    fn already_exists(id: String) -> Self { Self::AlreadyExists(id) }
    fn communication(message: String) -> Self { Self::ActorCommunicationError(message) }
}
