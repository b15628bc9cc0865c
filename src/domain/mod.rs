pub mod product;
pub mod coupon;
pub mod cart;
pub mod pricing;
pub mod order;
pub mod tracker;
pub mod review;
pub mod wishlist;
pub mod dashboard;
pub mod search;

pub use product::*;
pub use coupon::*;
pub use cart::*;
pub use pricing::*;
pub use order::*;
pub use review::*;
pub use wishlist::*;
