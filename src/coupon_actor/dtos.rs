use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{DiscountType, Paise};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCreate {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: u64,
    #[serde(default)]
    pub min_order_amount: Paise,
    pub max_discount: Option<Paise>,
    pub usage_limit: Option<u32>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPatch {
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub usage_limit: Option<u32>,
    pub valid_until: Option<DateTime<Utc>>,
}
