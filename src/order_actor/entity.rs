use crate::actor_framework::Entity;
use crate::domain::Order;
use super::actions::OrderAction;
use super::dtos::OrderCreate;
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &String { &self.order_id }

    /// Creates the order record in `Pending` with payment `Pending`.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, OrderError> {
        let mut order = Order::new(
            id,
            payload.customer,
            payload.shipping,
            payload.items,
            &payload.totals,
            payload.payment_method,
            payload.placed_at,
        );
        order.notes = payload.notes;
        Ok(order)
    }

    fn on_create(&mut self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::ValidationError("Order has no items".to_string()));
        }
        if !self.totals_consistent() {
            return Err(OrderError::ValidationError(format!(
                "Order totals do not add up: {} - {} + {} != {}",
                self.subtotal, self.coupon_discount, self.delivery_charge, self.total_amount
            )));
        }
        Ok(())
    }

    /// Status changes go through [`OrderAction::ApplyUpdate`].
    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Err(OrderError::ValidationError("Orders change only through status updates".to_string()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::ApplyUpdate { update, at } => {
                self.apply_update(update, at)?;
                Ok(self.clone())
            }
        }
    }
}
