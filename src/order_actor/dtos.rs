use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{CartItem, Customer, PaymentMethod, ShippingAddress, Totals};

/// Checkout request as submitted by the storefront.
///
/// Item prices are what the client saw; they are re-checked against the
/// catalog before an order is written.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub customer: Customer,
    pub shipping: ShippingAddress,
    pub items: Vec<CartItem>,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Fully priced order handed to the order store.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: Customer,
    pub shipping: ShippingAddress,
    pub items: Vec<CartItem>,
    pub totals: Totals,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub placed_at: DateTime<Utc>,
}
