use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum CouponAction {
    /// Re-checks redeemability and consumes one use in the same step, so
    /// concurrent checkouts cannot push `usage_count` past `usage_limit`.
    Redeem { at: DateTime<Utc> },
    /// Gives back a use consumed by a checkout that failed afterwards.
    Restore,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CouponActionResult {
    Redeemed { usage_count: u32 },
    Restored { usage_count: u32 },
}
