use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{normalize_code, Coupon, DiscountType};
use super::actions::{CouponAction, CouponActionResult};
use super::dtos::{CouponCreate, CouponPatch};
use super::error::CouponError;

fn validate(payload: &CouponCreate) -> Result<(), CouponError> {
    if normalize_code(&payload.code).is_empty() {
        return Err(CouponError::ValidationError("code is required".to_string()));
    }
    if payload.discount_value == 0 {
        return Err(CouponError::ValidationError("discountValue must be positive".to_string()));
    }
    if payload.discount_type == DiscountType::Percentage && payload.discount_value > 100 {
        return Err(CouponError::ValidationError("percentage discount cannot exceed 100".to_string()));
    }
    if payload.valid_from > payload.valid_until {
        return Err(CouponError::ValidationError("validFrom must not be after validUntil".to_string()));
    }
    Ok(())
}

impl Entity for Coupon {
    type Id = String;
    type CreatePayload = CouponCreate;
    type Patch = CouponPatch;
    type Action = CouponAction;
    type ActionResult = CouponActionResult;
    type Error = CouponError;

    fn id(&self) -> &String { &self.code }

    fn natural_key(payload: &CouponCreate) -> Option<String> {
        Some(normalize_code(&payload.code))
    }

    fn from_create(code: String, payload: CouponCreate) -> Result<Self, CouponError> {
        validate(&payload)?;
        Ok(Self {
            code,
            description: payload.description,
            discount_type: payload.discount_type,
            discount_value: payload.discount_value,
            min_order_amount: payload.min_order_amount,
            max_discount: payload.max_discount,
            usage_limit: payload.usage_limit,
            usage_count: 0,
            valid_from: payload.valid_from,
            valid_until: payload.valid_until,
            is_active: payload.is_active,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: CouponPatch) -> Result<(), CouponError> {
        if let Some(valid_until) = patch.valid_until {
            if valid_until < self.valid_from {
                return Err(CouponError::ValidationError("validUntil must not be before validFrom".to_string()));
            }
            self.valid_until = valid_until;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(usage_limit) = patch.usage_limit {
            self.usage_limit = Some(usage_limit);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CouponAction) -> Result<CouponActionResult, CouponError> {
        match action {
            CouponAction::Redeem { at } => {
                let usage_count = self.redeem(at)?;
                Ok(CouponActionResult::Redeemed { usage_count })
            }
            CouponAction::Restore => {
                self.usage_count = self.usage_count.saturating_sub(1);
                Ok(CouponActionResult::Restored { usage_count: self.usage_count })
            }
        }
    }
}
