use crate::domain::Paise;

/// Wishlist entry with the product snapshot already resolved.
#[derive(Debug, Clone)]
pub struct WishlistCreate {
    pub user_id: String,
    pub product_id: String,
    pub product_name: String,
    pub price: Paise,
    pub image: Option<String>,
}
