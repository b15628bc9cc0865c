use tracing::{error, info, instrument};
use crate::clients::{CouponClient, OrderClient, ProductClient, ReviewClient, WishlistClient};
use crate::actor_framework::ResourceActor;
use crate::domain::{generate_order_id, Coupon, Order, Product, Review, WishlistItem};
use super::{Config, SystemError};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The storefront backend: one actor per resource, wired together.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct StoreSystem {
    pub product_client: ProductClient,
    pub coupon_client: CouponClient,
    pub order_client: OrderClient,
    pub review_client: ReviewClient,
    pub wishlist_client: WishlistClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new(config: &Config) -> Self {
        let buffer = config.actor_buffer;

        // 1. Catalog
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer, sequential_ids("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Coupons are keyed by their normalized code, the generator is never called
        let (coupon_actor, coupon_resource_client) =
            ResourceActor::<Coupon>::new(buffer, sequential_ids("coupon"));
        let coupon_client = CouponClient::new(coupon_resource_client);
        let coupon_handle = tokio::spawn(coupon_actor.run());

        // 3. Orders depend on the catalog and coupons
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(buffer, || generate_order_id(Utc::now()));
        let order_client = OrderClient::new(
            order_resource_client,
            product_client.clone(),
            coupon_client.clone(),
            config.checkout_policy(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Reviews and wishlists
        let (review_actor, review_resource_client) =
            ResourceActor::<Review>::new(buffer, sequential_ids("review"));
        let review_client = ReviewClient::new(review_resource_client, product_client.clone());
        let review_handle = tokio::spawn(review_actor.run());

        let (wishlist_actor, wishlist_resource_client) =
            ResourceActor::<WishlistItem>::new(buffer, sequential_ids("wishlist"));
        let wishlist_client = WishlistClient::new(wishlist_resource_client, product_client.clone());
        let wishlist_handle = tokio::spawn(wishlist_actor.run());

        info!(buffer, "Store actors started");

        Self {
            product_client,
            coupon_client,
            order_client,
            review_client,
            wishlist_client,
            handles: vec![product_handle, coupon_handle, order_handle, review_handle, wishlist_handle],
        }
    }

    /// Closes every actor channel and waits for the actors to drain.
    ///
    /// Clones of the clients held elsewhere (the HTTP state) must be dropped
    /// first or this waits for them.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down store system");
        drop(self.order_client);
        drop(self.review_client);
        drop(self.wishlist_client);
        drop(self.coupon_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(format!("{e:?}")));
            }
        }

        info!("Store system shutdown complete");
        Ok(())
    }
}
