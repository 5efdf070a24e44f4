//! Route handlers.

pub mod cart;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod payment;
pub mod products;
pub mod wishlist;
