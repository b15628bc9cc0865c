//! Product-specific store logic, including stock management actions.

mod actions;
mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
