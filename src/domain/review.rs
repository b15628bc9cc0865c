use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clamp_rating;

pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Mean of `count` ratings summing to `total`, rounded to one decimal.
pub fn average_rating(total: u64, count: u32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let average = (total as f64 / f64::from(count) * 10.0).round() / 10.0;
    clamp_rating(average as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(0, 0), 0.0);
        assert_eq!(average_rating(13, 3), 4.3);
        assert_eq!(average_rating(10, 2), 5.0);
    }
}
