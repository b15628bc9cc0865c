use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use crate::domain::dashboard::{summarize, DashboardSummary};
use crate::domain::tracker::{render, Timeline};
use crate::domain::{compute_totals, CartItem, Coupon, DeliveryPolicy, Order, OrderStatusUpdate, Paise, Totals};
use crate::order_actor::{Checkout, OrderAction, OrderCreate, OrderError};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::{CouponClient, ProductClient};

/// Server-side pricing rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    pub delivery: DeliveryPolicy,
    /// Allowed drift between the submitted and current unit price, in basis points.
    pub price_tolerance_bps: u32,
}

/// A priced cart ready to be written as an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub items: Vec<CartItem>,
    pub coupon: Option<Coupon>,
    pub totals: Totals,
}

/// Client for interacting with the Order actor.
///
/// This client handles the checkout orchestration: it re-prices lines
/// against the catalog, reserves stock and redeems the coupon before an
/// order is written, releasing what it took if a later step fails.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    product_client: ProductClient,
    coupon_client: CouponClient,
    policy: CheckoutPolicy,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

fn within_tolerance(submitted: Paise, current: Paise, tolerance_bps: u32) -> bool {
    let allowed = current.saturating_mul(u64::from(tolerance_bps)) / 10_000;
    submitted.abs_diff(current) <= allowed
}

fn validate_checkout(checkout: &Checkout) -> Result<(), OrderError> {
    let required = [
        ("customer.name", &checkout.customer.name),
        ("customer.email", &checkout.customer.email),
        ("shipping.address", &checkout.shipping.address),
        ("shipping.city", &checkout.shipping.city),
        ("shipping.pincode", &checkout.shipping.pincode),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(OrderError::ValidationError(format!("{field} is required")));
    }
    if !checkout.customer.email.contains('@') {
        return Err(OrderError::ValidationError("customer.email is invalid".to_string()));
    }
    Ok(())
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        product_client: ProductClient,
        coupon_client: CouponClient,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            inner,
            product_client,
            coupon_client,
            policy,
        }
    }

    /// Replaces every submitted line with a snapshot of the current product.
    ///
    /// Lines for the same product are merged. Missing or inactive products and
    /// prices outside the tolerance are rejected.
    #[instrument(fields(lines = items.len()), skip(self, items))]
    async fn reprice(&self, items: &[CartItem]) -> Result<Vec<CartItem>, OrderError> {
        if items.is_empty() {
            return Err(OrderError::ValidationError("Cart is empty".to_string()));
        }

        let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for item in items {
            if item.quantity == 0 {
                return Err(OrderError::ValidationError(format!("Quantity for {} must be at least 1", item.product_id)));
            }
            match positions.get(item.product_id.as_str()) {
                Some(&index) => merged[index].quantity = merged[index].quantity.saturating_add(item.quantity),
                None => {
                    positions.insert(item.product_id.as_str(), merged.len());
                    merged.push(item.clone());
                }
            }
        }

        let mut priced = Vec::with_capacity(merged.len());
        for line in merged {
            let product = match self.product_client.get_product(line.product_id.clone()).await? {
                Some(product) if product.is_active => product,
                _ => {
                    error!(product_id = %line.product_id, "Product unavailable");
                    return Err(OrderError::InvalidProduct(line.product_id));
                }
            };
            if !within_tolerance(line.price, product.price, self.policy.price_tolerance_bps) {
                warn!(product_id = %product.id, submitted = line.price, current = product.price, "Price drift");
                return Err(OrderError::PriceChanged {
                    product_id: product.id,
                    submitted: line.price,
                    current: product.price,
                });
            }
            priced.push(CartItem::from_product(&product, line.quantity));
        }
        Ok(priced)
    }

    /// Prices a cart against the current catalog without reserving anything.
    #[instrument(skip(self, items))]
    pub async fn quote(&self, items: &[CartItem], coupon_code: Option<String>, now: DateTime<Utc>) -> Result<Quote, OrderError> {
        let items = self.reprice(items).await?;
        let coupon = match coupon_code.filter(|code| !code.trim().is_empty()) {
            Some(code) => Some(self.coupon_client.validate(code, now).await?),
            None => None,
        };
        let totals = compute_totals(&items, coupon.as_ref(), &self.policy.delivery)?;
        debug!(subtotal = totals.subtotal, total = totals.total, "Cart priced");
        Ok(Quote { items, coupon, totals })
    }

    async fn release_reserved(&self, reserved: &[(String, u32)]) {
        for (product_id, quantity) in reserved {
            if let Err(e) = self.product_client.release_stock(product_id.clone(), *quantity).await {
                error!(product_id = %product_id, error = %e, "Failed to release reserved stock");
            }
        }
    }

    #[instrument(
        fields(customer = %checkout.customer.email, lines = checkout.items.len(), coupon = ?checkout.coupon_code),
        skip(self, checkout)
    )]
    pub async fn create_order(&self, checkout: Checkout, now: DateTime<Utc>) -> Result<Order, OrderError> {
        info!("Processing checkout");
        validate_checkout(&checkout)?;

        // Step 1: Re-price against the catalog and validate the coupon
        let quote = self.quote(&checkout.items, checkout.coupon_code.clone(), now).await?;

        // Step 2: Reserve stock
        let mut reserved = Vec::with_capacity(quote.items.len());
        for item in &quote.items {
            match self.product_client.reserve_stock(item.product_id.clone(), item.quantity).await {
                Ok(remaining) => {
                    debug!(product_id = %item.product_id, remaining, "Stock reserved");
                    reserved.push((item.product_id.clone(), item.quantity));
                }
                Err(e) => {
                    error!(error = %e, "Stock reservation failed");
                    self.release_reserved(&reserved).await;
                    return Err(e.into());
                }
            }
        }

        // Step 3: Redeem the coupon, atomically against its usage limit
        if let Some(coupon) = &quote.coupon {
            if let Err(e) = self.coupon_client.redeem(coupon.code.clone(), now).await {
                self.release_reserved(&reserved).await;
                return Err(e.into());
            }
        }

        // Step 4: Write the order
        let payload = OrderCreate {
            customer: checkout.customer,
            shipping: checkout.shipping,
            items: quote.items,
            totals: quote.totals,
            payment_method: checkout.payment_method,
            notes: checkout.notes,
            placed_at: now,
        };
        let created = match self.inner.create(payload).await {
            Ok(id) => self.inner.get(id).await,
            Err(e) => Err(e),
        };
        match created {
            Ok(Some(order)) => {
                info!(order_id = %order.order_id, total = order.total_amount, "Order created successfully");
                Ok(order)
            }
            other => {
                let e = match other {
                    Err(e) => e.into_entity_error(),
                    _ => OrderError::ActorCommunicationError("Order vanished after create".to_string()),
                };
                error!(error = %e, "Order creation failed");
                self.release_reserved(&reserved).await;
                if let Some(coupon) = &quote.coupon {
                    if let Err(e) = self.coupon_client.restore(coupon.code.clone()).await {
                        error!(code = %coupon.code, error = %e, "Failed to restore coupon use");
                    }
                }
                Err(e)
            }
        }
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list_orders().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: String, update: OrderStatusUpdate, now: DateTime<Utc>) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .perform_action(id, OrderAction::ApplyUpdate { update, at: now })
            .await
            .map_err(FrameworkError::into_entity_error)?;
        info!(status = %order.order_status, "Order updated");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn timeline(&self, id: String) -> Result<Timeline, OrderError> {
        let order = self
            .get_order(id.clone())
            .await?
            .ok_or(OrderError::NotFound(id))?;
        Ok(render(&order))
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self, now: DateTime<Utc>, days: i64) -> Result<DashboardSummary, OrderError> {
        let orders = self.list_orders().await?;
        Ok(summarize(&orders, now, days))
    }
}
