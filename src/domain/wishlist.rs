use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Paise;

/// A product saved by a user. Product fields are a snapshot taken when saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub product_name: String,
    pub price: Paise,
    pub image: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Store key for a (user, product) pair. The user id is length-prefixed so
/// ids containing the separator cannot collide.
pub fn wishlist_key(user_id: &str, product_id: &str) -> String {
    format!("{}:{user_id}:{product_id}", user_id.len())
}
