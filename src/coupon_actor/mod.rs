//! Coupon store: codes are the store key and redemption is a single action.

mod actions;
mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
