use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Review, MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use super::dtos::ReviewCreate;
use super::error::ReviewError;

impl Entity for Review {
    type Id = String;
    type CreatePayload = ReviewCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = ReviewError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: ReviewCreate) -> Result<Self, ReviewError> {
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&payload.rating) {
            return Err(ReviewError::InvalidRating(payload.rating));
        }
        if payload.user_name.trim().is_empty() || payload.comment.trim().is_empty() {
            return Err(ReviewError::ValidationError("userName and comment are required".to_string()));
        }
        Ok(Self {
            id,
            product_id: payload.product_id,
            user_name: payload.user_name.trim().to_string(),
            rating: payload.rating,
            title: payload.title.filter(|title| !title.trim().is_empty()),
            comment: payload.comment.trim().to_string(),
            created_at: Utc::now(),
        })
    }

    /// Reviews are immutable once posted.
    fn on_update(&mut self, _patch: ()) -> Result<(), ReviewError> {
        Err(ReviewError::ValidationError("Reviews cannot be edited".to_string()))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ReviewError> {
        Ok(())
    }
}
