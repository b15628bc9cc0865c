//! Drone storefront backend: catalog, coupons, checkout and order tracking,
//! each resource owned by its own actor.

pub mod domain;
pub mod clients;
pub mod client_state;

pub mod app_system;
pub mod http;

#[cfg(test)]
mod mock_framework;

pub mod actor_framework;
pub mod product_actor;
pub mod coupon_actor;
pub mod order_actor;
pub mod review_actor;
pub mod wishlist_actor;
