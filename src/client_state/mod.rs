//! Storefront-side state: the cart and the admin session.
//!
//! Both sit behind injected repositories so they can be exercised without a
//! browser. The cart is never authoritative; checkout re-prices it.

mod cart;
mod repository;
mod session;

pub use cart::*;
pub use repository::*;
pub use session::*;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientStateError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Persistence error: {0}")]
    Persistence(String),
}
