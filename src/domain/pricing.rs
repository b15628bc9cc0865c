//! Cart totals. Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CartItem, Coupon, DiscountType, Paise};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Coupon {code} requires a minimum order of {required}, cart subtotal is {subtotal}")]
    BelowMinimumOrder { code: String, required: Paise, subtotal: Paise },
}

/// Flat delivery fee, waived from `free_above` upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    pub free_above: Paise,
    pub flat_fee: Paise,
}

impl DeliveryPolicy {
    pub const FREE: DeliveryPolicy = DeliveryPolicy { free_above: 0, flat_fee: 0 };

    pub fn charge_for(&self, subtotal: Paise) -> Paise {
        if subtotal == 0 || subtotal >= self.free_above {
            0
        } else {
            self.flat_fee
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Paise,
    pub discount: Paise,
    pub delivery_charge: Paise,
    pub total: Paise,
    pub coupon_code: Option<String>,
}

pub fn subtotal(items: &[CartItem]) -> Paise {
    items.iter().fold(0, |acc: Paise, item| acc.saturating_add(item.line_total()))
}

/// Discount a coupon grants on `subtotal`, before the subtotal cap.
pub fn coupon_discount(coupon: &Coupon, subtotal: Paise) -> Result<Paise, PricingError> {
    if subtotal < coupon.min_order_amount {
        return Err(PricingError::BelowMinimumOrder {
            code: coupon.code.clone(),
            required: coupon.min_order_amount,
            subtotal,
        });
    }
    let discount = match coupon.discount_type {
        DiscountType::Percentage => {
            let raw = subtotal.saturating_mul(coupon.discount_value) / 100;
            coupon.max_discount.map_or(raw, |cap| raw.min(cap))
        }
        DiscountType::Fixed => coupon.discount_value,
    };
    Ok(discount)
}

/// Computes the totals for a cart.
///
/// The applied discount never exceeds the subtotal, so
/// `total == subtotal - discount + delivery_charge` holds exactly and the
/// total can never go below the delivery charge.
pub fn compute_totals(
    items: &[CartItem],
    coupon: Option<&Coupon>,
    delivery: &DeliveryPolicy,
) -> Result<Totals, PricingError> {
    let subtotal = subtotal(items);
    let discount = match coupon {
        Some(coupon) => coupon_discount(coupon, subtotal)?.min(subtotal),
        None => 0,
    };
    let delivery_charge = delivery.charge_for(subtotal);
    Ok(Totals {
        subtotal,
        discount,
        delivery_charge,
        total: (subtotal - discount).saturating_add(delivery_charge),
        coupon_code: coupon.map(|c| c.code.clone()),
    })
}
