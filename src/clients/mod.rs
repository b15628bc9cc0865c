//! Typed clients over the resource actors. Each client converts framework
//! failures into its own domain error and traces every request.

#[macro_use]
mod macros;

mod product_client;
mod coupon_client;
mod order_client;
mod review_client;
mod wishlist_client;

pub use product_client::ProductClient;
pub use coupon_client::CouponClient;
pub use order_client::{CheckoutPolicy, OrderClient, Quote};
pub use review_client::ReviewClient;
pub use wishlist_client::WishlistClient;
