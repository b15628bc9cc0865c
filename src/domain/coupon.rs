use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Paise;
use crate::coupon_actor::CouponError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A redeemable discount code with a validity window and usage cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Always stored uppercase; doubles as the store key.
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    /// Percent for [`DiscountType::Percentage`], paise for [`DiscountType::Fixed`].
    pub discount_value: u64,
    pub min_order_amount: Paise,
    pub max_discount: Option<Paise>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Codes are case-insensitive and stored uppercase.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl Coupon {
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now && now <= self.valid_until
    }

    pub fn has_uses_left(&self) -> bool {
        self.usage_limit.map_or(true, |limit| self.usage_count < limit)
    }

    /// Redeemability check at `now`. Has no side effects.
    pub fn check_redeemable(&self, now: DateTime<Utc>) -> Result<(), CouponError> {
        if !self.is_active || !self.in_window(now) {
            return Err(CouponError::NotFoundOrExpired(self.code.clone()));
        }
        if !self.has_uses_left() {
            return Err(CouponError::UsageLimitExceeded(self.code.clone()));
        }
        Ok(())
    }

    /// Checks redeemability and consumes one use.
    pub(crate) fn redeem(&mut self, now: DateTime<Utc>) -> Result<u32, CouponError> {
        self.check_redeemable(now)?;
        self.usage_count += 1;
        Ok(self.usage_count)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::coupon;
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" save10 "), "SAVE10");
        assert_eq!(normalize_code("SAVE10"), "SAVE10");
    }

    #[test]
    fn test_usage_limit_exceeded() {
        let mut c = coupon("ONCE", DiscountType::Fixed, 500);
        c.usage_limit = Some(1);
        c.usage_count = 1;
        assert_eq!(
            c.check_redeemable(Utc::now()),
            Err(CouponError::UsageLimitExceeded("ONCE".into()))
        );
    }

    #[test]
    fn test_redeemable_iff_active_in_window_with_uses_left() {
        let base = coupon("WINDOW", DiscountType::Percentage, 10);
        let times = [
            base.valid_from - Duration::seconds(1),
            base.valid_from,
            base.valid_from + Duration::hours(5),
            base.valid_until,
            base.valid_until + Duration::seconds(1),
        ];
        for active in [true, false] {
            for limit in [None, Some(0), Some(2)] {
                for count in [0, 1, 2, 3] {
                    for t in times {
                        let mut c = base.clone();
                        c.is_active = active;
                        c.usage_limit = limit;
                        c.usage_count = count;
                        let expected = active
                            && c.valid_from <= t
                            && t <= c.valid_until
                            && limit.map_or(true, |l| count < l);
                        assert_eq!(c.check_redeemable(t).is_ok(), expected, "{c:?} at {t}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_redeem_increments_only_on_success() {
        let mut c = coupon("TWICE", DiscountType::Fixed, 100);
        c.usage_limit = Some(2);
        let now = Utc::now();
        assert_eq!(c.redeem(now), Ok(1));
        assert_eq!(c.redeem(now), Ok(2));
        assert!(c.redeem(now).is_err());
        assert_eq!(c.usage_count, 2);
    }
}
