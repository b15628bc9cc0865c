//! Order store. Orders are snapshots written once at checkout; afterwards
//! only operator status updates touch them.

mod actions;
mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
