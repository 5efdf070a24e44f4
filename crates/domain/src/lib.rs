//! Domain layer: entities and value objects for the storefront.
//!
//! Documents here serialize camelCase to match the persisted store shape;
//! the order's line items are a point-in-time snapshot of product data,
//! while cart entries are live references expanded on every read.

mod error;
mod order;
mod product;
mod user;

pub use error::DomainError;
pub use order::{LineItem, Order, OrderStatus, Shipment, ShippingInfo};
pub use product::Product;
pub use user::{CartEntry, Role, User};
