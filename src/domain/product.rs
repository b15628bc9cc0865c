use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency amount in the smallest unit (paise).
pub type Paise = u64;

pub const MAX_RATING: f32 = 5.0;

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Paise,
    pub original_price: Option<Paise>,
    /// Advertised discount percent, display only.
    pub discount: u8,
    pub stock: u32,
    pub rating: f32,
    pub reviews: u32,
    /// Sum of every review rating; `rating` is derived from it.
    #[serde(skip)]
    pub rating_total: u64,
    pub images: Vec<String>,
    pub specs: BTreeMap<String, String>,
    pub is_active: bool,
    /// Position in catalog listings, ascending.
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>, price: Paise, stock: u32) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            original_price: None,
            discount: 0,
            stock,
            rating: 0.0,
            reviews: 0,
            rating_total: 0,
            images: Vec::new(),
            specs: BTreeMap::new(),
            is_active: true,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// First image, used as the line item thumbnail.
    pub fn primary_image(&self) -> Option<String> {
        self.images.first().cloned()
    }

    /// Matches `needle` (already lowercased) against name, description and category.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// Clamp a rating into the `[0, 5]` range. NaN maps to 0.
pub fn clamp_rating(rating: f32) -> f32 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating(7.2), 5.0);
        assert_eq!(clamp_rating(-1.0), 0.0);
        assert_eq!(clamp_rating(f32::NAN), 0.0);
        assert_eq!(clamp_rating(4.5), 4.5);
    }

    #[test]
    fn test_matches_text_searches_all_fields() {
        let mut product = Product::new("p1", "Falcon X8", "Agriculture", 100, 1);
        product.description = "Crop spraying octocopter".into();
        assert!(product.matches_text("falcon"));
        assert!(product.matches_text("spraying"));
        assert!(product.matches_text("agri"));
        assert!(product.matches_text(""));
        assert!(!product.matches_text("mapping"));
    }
}
