//! Read-only timeline view of an order's status.
//!
//! There is no event log behind this: step times are `created_at` plus fixed
//! offsets and are flagged as approximate.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{Order, OrderStatus};

/// Hours after placement shown for each step of [`OrderStatus::STEPS`].
const STEP_OFFSET_HOURS: [i64; 4] = [0, 24, 48, 120];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub completed: bool,
    pub current: bool,
    pub approximate_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Timeline {
    #[serde(rename_all = "camelCase")]
    Progress {
        order_id: String,
        steps: Vec<TimelineStep>,
        tracking_number: Option<String>,
        approximate: bool,
    },
    #[serde(rename_all = "camelCase")]
    Cancelled {
        order_id: String,
        cancelled_at: DateTime<Utc>,
    },
}

pub fn render(order: &Order) -> Timeline {
    let current = match order.order_status.step_index() {
        Some(index) => index,
        None => {
            return Timeline::Cancelled {
                order_id: order.order_id.clone(),
                cancelled_at: order.updated_at,
            }
        }
    };

    let steps = OrderStatus::STEPS
        .iter()
        .zip(STEP_OFFSET_HOURS)
        .enumerate()
        .map(|(index, (status, offset))| TimelineStep {
            status: *status,
            completed: index <= current,
            current: index == current,
            approximate_at: order.created_at + Duration::hours(offset),
        })
        .collect();

    Timeline::Progress {
        order_id: order.order_id.clone(),
        steps,
        tracking_number: order.tracking_number.clone(),
        approximate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::fixtures::order_placed_at;

    #[test]
    fn test_shipped_marks_first_three_complete() {
        let mut order = order_placed_at(Utc::now(), 500);
        order.order_status = OrderStatus::Shipped;
        match render(&order) {
            Timeline::Progress { steps, approximate, .. } => {
                assert!(approximate);
                let done: Vec<bool> = steps.iter().map(|s| s.completed).collect();
                assert_eq!(done, vec![true, true, true, false]);
                assert!(steps[2].current);
                assert_eq!(steps[1].approximate_at, order.created_at + Duration::hours(24));
            }
            other => panic!("unexpected timeline: {other:?}"),
        }
    }

    #[test]
    fn test_pending_and_delivered_edges() {
        let mut order = order_placed_at(Utc::now(), 500);
        let Timeline::Progress { steps, .. } = render(&order) else { panic!("expected progress") };
        assert_eq!(steps.iter().filter(|s| s.completed).count(), 1);

        order.order_status = OrderStatus::Delivered;
        let Timeline::Progress { steps, .. } = render(&order) else { panic!("expected progress") };
        assert!(steps.iter().all(|s| s.completed));
    }

    #[test]
    fn test_cancelled_short_circuits() {
        let mut order = order_placed_at(Utc::now(), 500);
        order.order_status = OrderStatus::Cancelled;
        assert_eq!(
            render(&order),
            Timeline::Cancelled { order_id: order.order_id.clone(), cancelled_at: order.updated_at }
        );
    }
}
