use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{Order, OrderStatus, Paise};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    pub revenue: Paise,
    pub orders: u64,
    pub average_order_value: Paise,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub window_days: i64,
    pub current: PeriodMetrics,
    pub previous: PeriodMetrics,
    /// `None` when the previous window had no revenue.
    pub revenue_change_pct: Option<f64>,
    pub orders_change_pct: Option<f64>,
    pub orders_by_status: BTreeMap<String, u64>,
}

fn metrics<'a>(orders: impl Iterator<Item = &'a Order>) -> PeriodMetrics {
    let mut period = PeriodMetrics::default();
    for order in orders {
        period.orders += 1;
        period.revenue = period.revenue.saturating_add(order.total_amount);
    }
    if period.orders > 0 {
        period.average_order_value = period.revenue / period.orders;
    }
    period
}

fn change_pct(current: u64, previous: u64) -> Option<f64> {
    (previous > 0).then(|| (current as f64 - previous as f64) / previous as f64 * 100.0)
}

/// Compares `[now - days, now)` with the window of equal length before it.
/// Cancelled orders count towards `orders_by_status` only.
pub fn summarize(orders: &[Order], now: DateTime<Utc>, days: i64) -> DashboardSummary {
    let window = Duration::days(days);
    let current_start = now - window;
    let previous_start = current_start - window;

    let billable = || orders.iter().filter(|o| o.order_status != OrderStatus::Cancelled);
    let current = metrics(billable().filter(|o| o.created_at >= current_start && o.created_at < now));
    let previous = metrics(
        billable().filter(|o| o.created_at >= previous_start && o.created_at < current_start),
    );

    let mut orders_by_status = BTreeMap::new();
    for order in orders {
        *orders_by_status.entry(order.order_status.to_string()).or_insert(0) += 1;
    }

    DashboardSummary {
        window_days: days,
        revenue_change_pct: change_pct(current.revenue, previous.revenue),
        orders_change_pct: change_pct(current.orders, previous.orders),
        current,
        previous,
        orders_by_status,
    }
}
