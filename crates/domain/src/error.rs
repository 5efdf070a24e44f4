//! Domain error types.

use thiserror::Error;

/// Errors raised while validating or constructing domain entities.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Order has no line items.
    #[error("Order must contain at least one item")]
    NoItems,

    /// Line item quantity must be positive.
    #[error("Invalid quantity for product {product_id}: {quantity} (must be greater than 0)")]
    InvalidQuantity { product_id: String, quantity: u32 },

    /// Line item price must be non-negative.
    #[error("Invalid price for product {product_id}: {price} (must not be negative)")]
    InvalidPrice { product_id: String, price: f64 },

    /// Shipping address is required.
    #[error("Shipping address is required")]
    MissingAddress,

    /// Declared total does not match the sum of line items.
    #[error("Total amount mismatch: declared {declared}, computed {computed}")]
    TotalMismatch { declared: f64, computed: f64 },

    /// Shipment metadata may only be attached once.
    #[error("Order already has a shipment attached")]
    ShipmentAlreadyAttached,
}
