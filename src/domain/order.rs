use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{CartItem, Paise, Totals};
use crate::order_actor::OrderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid order status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    /// The forward path; `Cancelled` sits outside it.
    pub const STEPS: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Position on the forward path, `None` for `Cancelled`.
    pub fn step_index(self) -> Option<usize> {
        Self::STEPS.iter().position(|step| *step == self)
    }

    /// Moves one step forward, or to `Cancelled` from any non-terminal state.
    pub fn transition(self, requested: OrderStatus) -> Result<OrderStatus, InvalidTransition> {
        let rejected = InvalidTransition { from: self, to: requested };
        if self.is_terminal() {
            return Err(rejected);
        }
        if requested == OrderStatus::Cancelled {
            return Ok(requested);
        }
        match (self.step_index(), requested.step_index()) {
            (Some(current), Some(next)) if next == current + 1 => Ok(requested),
            _ => Err(rejected),
        }
    }

    pub fn allows_tracking(self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Net Banking")]
    NetBanking,
    Wallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// The persisted result of a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer: Customer,
    pub shipping: ShippingAddress,
    /// Snapshot taken at checkout, independent of later product changes.
    pub items: Vec<CartItem>,
    pub subtotal: Paise,
    pub delivery_charge: Paise,
    pub coupon_code: Option<String>,
    pub coupon_discount: Paise,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub total_amount: Paise,
    pub order_status: OrderStatus,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Operator changes to an existing order. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub tracking_number: Option<String>,
}

/// `ORD-<unix millis>-<9 random uppercase alphanumerics>`.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("ORD-{}-{}", now.timestamp_millis(), &random[..9])
}

impl Order {
    pub fn new(
        order_id: impl Into<String>,
        customer: Customer,
        shipping: ShippingAddress,
        items: Vec<CartItem>,
        totals: &Totals,
        payment_method: PaymentMethod,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer,
            shipping,
            items,
            subtotal: totals.subtotal,
            delivery_charge: totals.delivery_charge,
            coupon_code: totals.coupon_code.clone(),
            coupon_discount: totals.discount,
            payment_method,
            payment_status: PaymentStatus::Pending,
            total_amount: totals.total,
            order_status: OrderStatus::Pending,
            tracking_number: None,
            notes: None,
            created_at: placed_at,
            updated_at: placed_at,
        }
    }

    pub fn totals_consistent(&self) -> bool {
        self.subtotal
            .checked_sub(self.coupon_discount)
            .and_then(|rest| rest.checked_add(self.delivery_charge))
            == Some(self.total_amount)
    }

    /// Applies an operator update all-or-nothing.
    pub fn apply_update(&mut self, update: OrderStatusUpdate, at: DateTime<Utc>) -> Result<(), OrderError> {
        let tracking = update
            .tracking_number
            .map(|number| number.trim().to_string())
            .filter(|number| !number.is_empty());
        if update.order_status.is_none() && update.payment_status.is_none() && tracking.is_none() {
            return Err(OrderError::ValidationError("Nothing to update".to_string()));
        }

        let next_status = match update.order_status {
            Some(requested) => self.order_status.transition(requested)?,
            None => self.order_status,
        };
        if tracking.is_some() && !next_status.allows_tracking() {
            return Err(OrderError::TrackingNotAllowed(next_status));
        }

        self.order_status = next_status;
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
        if tracking.is_some() {
            self.tracking_number = tracking;
        }
        self.updated_at = at;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::order_placed_at;
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 5] = [Pending, Processing, Shipped, Delivered, Cancelled];

    #[test]
    fn test_transition_table() {
        let allowed = [
            (Pending, Processing),
            (Processing, Shipped),
            (Shipped, Delivered),
            (Pending, Cancelled),
            (Processing, Cancelled),
            (Shipped, Cancelled),
        ];
        for from in ALL {
            for to in ALL {
                let result = from.transition(to);
                if allowed.contains(&(from, to)) {
                    assert_eq!(result, Ok(to));
                } else {
                    assert_eq!(result, Err(InvalidTransition { from, to }), "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn test_pending_to_delivered_requires_intermediate_steps() {
        let mut order = order_placed_at(Utc::now(), 1_000);
        let skip = OrderStatusUpdate { order_status: Some(Delivered), ..Default::default() };
        assert!(matches!(
            order.apply_update(skip.clone(), Utc::now()),
            Err(OrderError::InvalidTransition(InvalidTransition { from: Pending, to: Delivered }))
        ));
        for step in [Processing, Shipped] {
            let update = OrderStatusUpdate { order_status: Some(step), ..Default::default() };
            order.apply_update(update, Utc::now()).unwrap();
        }
        order.apply_update(skip, Utc::now()).unwrap();
        assert_eq!(order.order_status, Delivered);
    }

    #[test]
    fn test_tracking_only_once_shipped() {
        let mut order = order_placed_at(Utc::now(), 1_000);
        let early = OrderStatusUpdate { tracking_number: Some("TRK1".into()), ..Default::default() };
        assert_eq!(
            order.apply_update(early, Utc::now()),
            Err(OrderError::TrackingNotAllowed(Pending))
        );

        order.order_status = Processing;
        let with_ship = OrderStatusUpdate {
            order_status: Some(Shipped),
            tracking_number: Some(" TRK1 ".into()),
            ..Default::default()
        };
        order.apply_update(with_ship, Utc::now()).unwrap();
        assert_eq!(order.tracking_number.as_deref(), Some("TRK1"));
    }

    #[test]
    fn test_failed_update_is_all_or_nothing() {
        let mut order = order_placed_at(Utc::now(), 1_000);
        let update = OrderStatusUpdate {
            order_status: Some(Shipped),
            payment_status: Some(PaymentStatus::Completed),
            tracking_number: None,
        };
        assert!(order.apply_update(update, Utc::now()).is_err());
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert!(order.apply_update(OrderStatusUpdate::default(), Utc::now()).is_err());
    }

    #[test]
    fn test_order_id_format() {
        let now = Utc::now();
        let id = generate_order_id(now);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_ne!(id, generate_order_id(now));
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::CreditCard).unwrap(), "\"Credit Card\"");
        assert_eq!(serde_json::from_str::<PaymentMethod>("\"UPI\"").unwrap(), PaymentMethod::Upi);
    }
}
