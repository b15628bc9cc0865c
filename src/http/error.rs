use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::coupon_actor::CouponError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::review_actor::ReviewError;
use crate::wishlist_actor::WishlistError;

#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        let message = e.to_string();
        match e {
            ProductError::NotFound(_) => ApiError::NotFound(message),
            ProductError::AlreadyExists(_) => ApiError::Conflict(message),
            ProductError::Inactive(_)
            | ProductError::InsufficientStock { .. }
            | ProductError::InvalidQuantity(_)
            | ProductError::ValidationError(_) => ApiError::Validation(message),
            ProductError::ActorCommunicationError(_) => ApiError::Unexpected(message),
        }
    }
}

impl From<CouponError> for ApiError {
    fn from(e: CouponError) -> Self {
        let message = e.to_string();
        match e {
            CouponError::NotFoundOrExpired(_) => ApiError::NotFound(message),
            CouponError::AlreadyExists(_) => ApiError::Conflict(message),
            CouponError::UsageLimitExceeded(_) | CouponError::ValidationError(_) => ApiError::Validation(message),
            CouponError::ActorCommunicationError(_) => ApiError::Unexpected(message),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::Coupon(inner) => inner.into(),
            OrderError::NotFound(_) => ApiError::NotFound(message),
            OrderError::AlreadyExists(_) | OrderError::PriceChanged { .. } => ApiError::Conflict(message),
            OrderError::InvalidProduct(_)
            | OrderError::InsufficientStock(_)
            | OrderError::Pricing(_)
            | OrderError::InvalidTransition(_)
            | OrderError::TrackingNotAllowed(_)
            | OrderError::ValidationError(_) => ApiError::Validation(message),
            OrderError::ActorCommunicationError(_) => ApiError::Unexpected(message),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(e: ReviewError) -> Self {
        let message = e.to_string();
        match e {
            ReviewError::NotFound(_) | ReviewError::ProductNotFound(_) => ApiError::NotFound(message),
            ReviewError::AlreadyExists(_) => ApiError::Conflict(message),
            ReviewError::InvalidRating(_) | ReviewError::ValidationError(_) => ApiError::Validation(message),
            ReviewError::ActorCommunicationError(_) => ApiError::Unexpected(message),
        }
    }
}

impl From<WishlistError> for ApiError {
    fn from(e: WishlistError) -> Self {
        let message = e.to_string();
        match e {
            WishlistError::NotFound(_) | WishlistError::ProductNotFound(_) => ApiError::NotFound(message),
            WishlistError::AlreadyExists(_) => ApiError::Conflict(message),
            WishlistError::ValidationError(_) => ApiError::Validation(message),
            WishlistError::ActorCommunicationError(_) => ApiError::Unexpected(message),
        }
    }
}
