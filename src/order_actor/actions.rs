use chrono::{DateTime, Utc};

use crate::domain::OrderStatusUpdate;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Operator update of status, payment status and tracking number.
    ApplyUpdate { update: OrderStatusUpdate, at: DateTime<Utc> },
}
