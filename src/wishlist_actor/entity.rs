use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{wishlist_key, WishlistItem};
use super::dtos::WishlistCreate;
use super::error::WishlistError;

impl Entity for WishlistItem {
    type Id = String;
    type CreatePayload = WishlistCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = WishlistError;

    fn id(&self) -> &String { &self.id }

    /// One entry per (user, product) pair.
    fn natural_key(payload: &WishlistCreate) -> Option<String> {
        Some(wishlist_key(&payload.user_id, &payload.product_id))
    }

    fn from_create(id: String, payload: WishlistCreate) -> Result<Self, WishlistError> {
        if payload.user_id.trim().is_empty() {
            return Err(WishlistError::ValidationError("userId is required".to_string()));
        }
        Ok(Self {
            id,
            user_id: payload.user_id,
            product_id: payload.product_id,
            product_name: payload.product_name,
            price: payload.price,
            image: payload.image,
            added_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), WishlistError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), WishlistError> {
        Ok(())
    }
}
